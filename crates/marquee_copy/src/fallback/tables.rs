//! Category and event-type lookup tables for fallback copy.
//!
//! Templates use `{offer}`, `{item}`, `{place}` and `{name}` placeholders.
//! Every promotion headline template mentions `{offer}`.
//!
//! Match tokens are compared per word: a word matches a token when it equals
//! the token or its plural, or, for tokens of five or more letters, when it
//! starts with it. Tokens containing spaces or hyphens match as substrings.

/// Copy profile for a business category.
#[derive(Debug)]
pub(crate) struct CategoryProfile {
    /// Table name, used in logs
    pub name: &'static str,
    /// Lower-case substrings of the category that select this profile
    pub matches: &'static [&'static str],
    /// How to refer to the venue when the business has no name
    pub place: &'static str,
    /// Headline templates, best first
    pub headlines: &'static [&'static str],
    /// Keyword seeds
    pub keywords: &'static [&'static str],
}

/// Copy profile for an event type.
#[derive(Debug)]
pub(crate) struct EventProfile {
    /// Table name, used in logs
    pub name: &'static str,
    /// Lower-case substrings of the event type that select this profile
    pub matches: &'static [&'static str],
    /// Title templates, best first
    pub titles: &'static [&'static str],
    /// Keyword seeds
    pub keywords: &'static [&'static str],
    /// Type-specific attendee guidelines
    pub guidelines: &'static [&'static str],
}

pub(crate) const CATEGORIES: &[CategoryProfile] = &[
    CategoryProfile {
        name: "dining",
        matches: &[
            "restaurant", "cafe", "café", "coffee", "bakery", "bar", "pizza", "food", "dining",
            "bistro", "grill", "kitchen", "deli", "brewery", "diner", "eatery", "taco", "sushi",
        ],
        place: "our restaurant",
        headlines: &[
            "{offer} at {place}",
            "Taste the Savings: {offer}",
            "Treat Yourself to {offer}",
            "{offer} on {item} This Week",
            "Hungry? Enjoy {offer}",
            "Dine In and Save: {offer}",
        ],
        keywords: &[
            "restaurant deals", "local dining", "food specials", "eat local", "dinner deals",
            "lunch specials", "places to eat", "foodie",
        ],
    },
    CategoryProfile {
        name: "beauty",
        matches: &[
            "salon", "spa", "beauty", "nail", "hair", "barber", "cosmetic", "skin", "massage",
            "lash", "lashes", "brow", "wax", "waxing", "skincare",
        ],
        place: "our salon",
        headlines: &[
            "{offer} at {place}",
            "Glow for Less: {offer}",
            "Pamper Yourself with {offer}",
            "{offer} on {item}",
            "Refresh Your Look: {offer}",
            "Self-Care Special: {offer}",
        ],
        keywords: &[
            "beauty deals", "salon specials", "self care", "pamper yourself", "spa day",
            "hair salon", "beauty treatment", "local salon",
        ],
    },
    CategoryProfile {
        name: "fitness",
        matches: &[
            "gym", "fitness", "yoga", "pilates", "crossfit", "martial", "dance", "dancing",
            "training", "cycle", "cycling", "boxing", "climb", "barre",
        ],
        place: "our studio",
        headlines: &[
            "{offer} at {place}",
            "Get Moving with {offer}",
            "{offer} on {item}",
            "Stronger for Less: {offer}",
            "Start Today: {offer}",
            "Your Fitness Goals, {offer}",
        ],
        keywords: &[
            "fitness deals", "gym membership", "workout classes", "get fit", "local gym",
            "fitness studio", "health and wellness", "exercise",
        ],
    },
    CategoryProfile {
        name: "retail",
        matches: &[
            "retail", "boutique", "shop", "store", "clothing", "apparel", "gift", "book",
            "bookstore", "jewelry", "market", "florist", "toy", "home goods",
        ],
        place: "our store",
        headlines: &[
            "{offer} at {place}",
            "Shop and Save: {offer}",
            "{offer} on {item}",
            "New Finds, {offer}",
            "Don't Miss {offer}",
            "Shop Local: {offer}",
        ],
        keywords: &[
            "shop local", "retail deals", "boutique sale", "gift ideas", "shopping deals",
            "local store", "new arrivals", "unique finds",
        ],
    },
    CategoryProfile {
        name: "services",
        matches: &[
            "repair", "cleaning", "service", "plumb", "auto", "automotive", "mechanic", "laundry", "pet",
            "groom", "tutor", "consult", "photograph", "landscap",
        ],
        place: "our team",
        headlines: &[
            "{offer} from {place}",
            "Book Now and Get {offer}",
            "{offer} on {item}",
            "Quality Service, {offer}",
            "Save Time and Money: {offer}",
            "Trusted Local Service: {offer}",
        ],
        keywords: &[
            "local services", "service deals", "book now", "trusted professionals",
            "affordable service", "local experts", "home services", "appointment",
        ],
    },
];

pub(crate) const DEFAULT_CATEGORY: CategoryProfile = CategoryProfile {
    name: "default",
    matches: &[],
    place: "our shop",
    headlines: &[
        "{offer} at {place}",
        "Limited Time: {offer}",
        "{offer} on {item}",
        "Don't Miss Out: {offer}",
        "Celebrate with {offer}",
        "Your Exclusive Deal: {offer}",
    ],
    keywords: &[
        "local business", "shop local", "support local", "neighborhood favorite",
        "community", "local favorite",
    ],
};

/// Seeds appended to every promotion keyword list.
pub(crate) const PROMOTION_KEYWORDS: &[&str] = &[
    "special offer",
    "limited time offer",
    "discount",
    "sale",
    "save money",
    "deals near me",
    "promotion",
    "coupon",
];

/// Guidelines shared by all promotions' terms.
pub(crate) const GENERAL_TERMS: &[&str] = &[
    "Cannot be combined with other offers or discounts.",
    "Limit one per customer per visit.",
    "Must mention or present this promotion at time of purchase.",
    "No cash value and not redeemable for cash.",
    "Not valid on prior purchases.",
    "Valid while supplies last.",
    "Offer valid at participating locations only.",
    "Management reserves the right to modify or end this promotion at any time.",
    "Subject to availability.",
];

pub(crate) const EVENT_TYPES: &[EventProfile] = &[
    EventProfile {
        name: "music",
        matches: &[
            "music", "concert", "band", "dj", "jazz", "karaoke", "open mic", "acoustic",
            "live", "singer", "orchestra",
        ],
        titles: &[
            "{name} at {place}",
            "Live at {place}: {name}",
            "A Night of Music: {name}",
            "{name}: Live and Local",
            "Sounds of {place}",
            "Turn It Up: {name}",
        ],
        keywords: &["live music", "concert", "music night", "local bands", "nightlife"],
        guidelines: &[
            "Please be respectful of performers and fellow guests.",
            "Requests are welcome but not guaranteed.",
        ],
    },
    EventProfile {
        name: "class",
        matches: &[
            "class", "workshop", "lesson", "course", "seminar", "tutorial", "demo", "craft",
            "paint", "learn",
        ],
        titles: &[
            "{name} at {place}",
            "Learn Something New: {name}",
            "Hands-On {name}",
            "{name}: Create and Connect",
            "Skill Up at {place}",
            "Make It Yourself: {name}",
        ],
        keywords: &["workshop", "classes near me", "learn something new", "hands-on class", "diy"],
        guidelines: &[
            "All materials are provided unless noted otherwise.",
            "Space is limited, so please register in advance.",
        ],
    },
    EventProfile {
        name: "food",
        matches: &[
            "tasting", "wine", "beer", "food", "dinner", "brunch", "cook", "cooking", "chef", "pairing",
            "supper", "cocktail",
        ],
        titles: &[
            "{name} at {place}",
            "Savor the Flavor: {name}",
            "A Taste of {place}",
            "{name}: Eat, Drink, Enjoy",
            "Flavors of {place}",
            "Raise a Glass: {name}",
        ],
        keywords: &["food tasting", "wine tasting", "foodie events", "tasting menu", "local flavors"],
        guidelines: &[
            "Please let staff know about any food allergies in advance.",
            "Guests must be 21 or older to sample alcoholic beverages.",
        ],
    },
    EventProfile {
        name: "market",
        matches: &[
            "sale", "market", "fair", "bazaar", "pop-up", "popup", "pop up", "vendor", "flea",
            "expo", "swap",
        ],
        titles: &[
            "{name} at {place}",
            "Shop Local: {name}",
            "Don't Miss the {name}",
            "{name}: Deals and Discoveries",
            "Treasures at {place}",
            "Find Something New: {name}",
        ],
        keywords: &["pop-up market", "shop local", "local vendors", "weekend market", "sale event"],
        guidelines: &[
            "Bring a reusable bag for your purchases.",
            "Vendors may accept cash only, so plan ahead.",
        ],
    },
];

pub(crate) const DEFAULT_EVENT: EventProfile = EventProfile {
    name: "default",
    matches: &[],
    titles: &[
        "{name} at {place}",
        "Join Us for {name}",
        "{name}: You're Invited",
        "A Special Day at {place}",
        "Celebrate with {place}",
        "Don't Miss {name}",
    ],
    keywords: &["special event", "community event"],
    guidelines: &[],
};

/// Seeds appended to every event keyword list.
pub(crate) const EVENT_KEYWORDS: &[&str] = &[
    "local events",
    "things to do",
    "events near me",
    "community",
    "weekend plans",
    "family friendly",
    "date night ideas",
    "fun activities",
];

/// Guidelines shared by all events.
pub(crate) const GENERAL_GUIDELINES: &[&str] = &[
    "Please arrive 10 to 15 minutes before the start time.",
    "Children must be accompanied by an adult.",
    "Please follow staff instructions at all times.",
    "Be respectful of the venue and other guests.",
    "Event details are subject to change.",
    "Photos may be taken during the event.",
    "Accessible seating is available on request.",
    "Outside food and drinks are not permitted.",
];

fn token_matches(text: &str, token: &str) -> bool {
    if token.contains([' ', '-']) {
        return text.contains(token);
    }
    text.split(|c: char| !c.is_alphanumeric()).any(|word| {
        word == token
            || word.strip_suffix('s') == Some(token)
            || (token.chars().count() >= 5 && word.starts_with(token))
    })
}

/// Profile for `category` (already lower-cased), by first table match.
pub(crate) fn category_profile(category: &str) -> &'static CategoryProfile {
    CATEGORIES
        .iter()
        .find(|profile| profile.matches.iter().any(|m| token_matches(category, m)))
        .unwrap_or(&DEFAULT_CATEGORY)
}

/// Profile for `event_type` (already lower-cased), by first table match.
pub(crate) fn event_profile(event_type: &str) -> &'static EventProfile {
    EVENT_TYPES
        .iter()
        .find(|profile| profile.matches.iter().any(|m| token_matches(event_type, m)))
        .unwrap_or(&DEFAULT_EVENT)
}
