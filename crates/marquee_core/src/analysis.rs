//! Image analysis results used as prompt context.

use serde::{Deserialize, Serialize};

/// Structured description of a promotional image.
///
/// Produced by image analysis and passed through to prompt construction.
/// Field names serialize in camelCase; snake_case is accepted on input.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ImageAnalysisResult {
    /// One or two sentences describing the image
    pub description: String,
    /// Notable visual elements
    pub elements: Vec<String>,
    /// Overall mood or atmosphere
    pub mood: String,
    /// Dominant colors
    pub colors: Vec<String>,
    /// Kind of product shown, if any
    #[serde(alias = "product_type", skip_serializing_if = "Option::is_none")]
    pub product_type: Option<String>,
    /// Audience the image appears aimed at
    #[serde(alias = "target_audience", skip_serializing_if = "Option::is_none")]
    pub target_audience: Option<String>,
}

impl ImageAnalysisResult {
    /// One-paragraph rendering for inclusion in a prompt.
    ///
    /// # Examples
    ///
    /// ```
    /// use marquee_core::ImageAnalysisResult;
    ///
    /// let analysis = ImageAnalysisResult {
    ///     description: "A wood-fired pizza on a rustic table".to_string(),
    ///     mood: "warm".to_string(),
    ///     colors: vec!["red".to_string(), "amber".to_string()],
    ///     ..Default::default()
    /// };
    /// let context = analysis.prompt_context();
    /// assert!(context.contains("wood-fired pizza"));
    /// assert!(context.contains("Mood: warm"));
    /// assert!(context.contains("Colors: red, amber"));
    /// ```
    pub fn prompt_context(&self) -> String {
        let mut parts = Vec::new();
        if !self.description.trim().is_empty() {
            parts.push(format!("Image shows: {}.", self.description.trim().trim_end_matches('.')));
        }
        if !self.elements.is_empty() {
            parts.push(format!("Key elements: {}.", self.elements.join(", ")));
        }
        if !self.mood.trim().is_empty() {
            parts.push(format!("Mood: {}.", self.mood.trim()));
        }
        if !self.colors.is_empty() {
            parts.push(format!("Colors: {}.", self.colors.join(", ")));
        }
        if let Some(product) = self.product_type.as_deref() {
            parts.push(format!("Product: {}.", product));
        }
        if let Some(audience) = self.target_audience.as_deref() {
            parts.push(format!("Audience: {}.", audience));
        }
        parts.join(" ")
    }
}
