use super::types::BusinessCategory;

/// Technology signature: tag recorded in the analysis, plus the substrings
/// that betray it anywhere in the page source.
pub const TECH_SIGNATURES: &[(&str, &[&str])] = &[
    ("wordpress", &["wp-content", "wordpress", "wp-includes"]),
    ("shopify", &["shopify", "myshopify"]),
    ("wix", &["wix.com", "wixstatic"]),
    ("squarespace", &["squarespace"]),
    ("react", &["react", "reactjs", "_next/static"]),
    ("vue", &["vue.js", "vuejs", "nuxt"]),
    ("angular", &["angular", "ng-version"]),
    ("jquery", &["jquery"]),
    ("bootstrap", &["bootstrap"]),
    ("tailwind", &["tailwindcss", "tailwind.css"]),
    ("google-analytics", &["google-analytics", "gtag", "googletagmanager"]),
    ("facebook-pixel", &["facebook.net/tr", "fbevents.js"]),
    ("hotjar", &["hotjar"]),
    ("stripe", &["js.stripe.com", "stripe"]),
    ("paypal", &["paypal"]),
    ("intercom", &["intercom"]),
    ("zendesk", &["zendesk"]),
    ("drift", &["drift.com", "driftt.com"]),
    ("hubspot", &["hubspot"]),
    ("mailchimp", &["mailchimp", "list-manage.com"]),
    ("salesforce", &["salesforce", "force.com"]),
    ("cloudflare", &["cloudflare", "cdnjs"]),
    ("recaptcha", &["recaptcha"]),
];

/// Tags that count as a modern frontend stack; absence suggests a legacy
/// architecture worth flagging.
pub const MODERN_FRONTEND_TAGS: &[&str] = &["react", "vue", "angular"];

pub const ANALYTICS_TAGS: &[&str] = &["google-analytics", "hotjar", "facebook-pixel"];

pub const CRM_TAGS: &[&str] = &["salesforce", "hubspot", "mailchimp"];

pub const CHAT_TAGS: &[&str] = &["intercom", "zendesk", "drift"];

/// Keyword banks per business category. Scored by occurrence count in the
/// visible text; ties resolve to the earlier entry.
pub const CATEGORY_KEYWORDS: &[(BusinessCategory, &[&str])] = &[
    (
        BusinessCategory::Ecommerce,
        &[
            "shop", "store", "buy", "cart", "checkout", "product", "price", "order", "inventory",
            "shipping",
        ],
    ),
    (
        BusinessCategory::Saas,
        &[
            "software", "platform", "api", "dashboard", "subscription", "cloud", "integration",
            "enterprise", "scalable",
        ],
    ),
    (
        BusinessCategory::Consulting,
        &[
            "consulting", "advisory", "strategy", "expert", "professional", "solutions",
            "transformation", "optimization",
        ],
    ),
    (
        BusinessCategory::Healthcare,
        &[
            "health", "medical", "doctor", "clinic", "patient", "care", "wellness", "treatment",
            "appointment",
        ],
    ),
    (
        BusinessCategory::Restaurant,
        &[
            "restaurant", "food", "menu", "delivery", "catering", "reservation", "dining",
            "cuisine",
        ],
    ),
];
