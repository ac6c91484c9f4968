use crate::insight_engine::types::InsightCategory;
use crate::site_analyzer::types::BusinessCategory;

/// Skeleton of one outreach email. `{company}` and `{first_name}` are filled
/// at assembly time; the observations come from the selected insights.
#[derive(Debug)]
pub struct EmailTemplate {
    pub subject: &'static str,
    pub hook: &'static str,
    pub invitation: &'static str,
}

/// Specialized templates for (business category, focus category) pairs where
/// a tailored angle reads better than the generic one.
const SPECIALIZED: &[(BusinessCategory, InsightCategory, EmailTemplate)] = &[
    (
        BusinessCategory::Ecommerce,
        InsightCategory::IndustrySpecific,
        EmailTemplate {
            subject: "Recoverable revenue I spotted at {company}",
            hook: "I took a close look at {company}'s store and found a gap that \
                   most online retailers lose real money to.",
            invitation: "Would a short call about what cart recovery could return \
                         for {company} be worth 15 minutes?",
        },
    ),
    (
        BusinessCategory::Ecommerce,
        InsightCategory::DigitalMarketing,
        EmailTemplate {
            subject: "{company}'s search visibility is leaving sales behind",
            hook: "While reviewing {company}'s storefront I noticed its search \
                   presence undersells the catalog.",
            invitation: "Happy to share the specific search findings for \
                         {company} if useful - open to a quick chat?",
        },
    ),
    (
        BusinessCategory::Restaurant,
        InsightCategory::IndustrySpecific,
        EmailTemplate {
            subject: "Keeping more margin per order at {company}",
            hook: "I looked at how guests reach {company} online and saw room to \
                   take orders and reservations without the platform fees.",
            invitation: "Would it help to see what direct ordering typically \
                         returns for a restaurant like {company}?",
        },
    ),
    (
        BusinessCategory::Healthcare,
        InsightCategory::IndustrySpecific,
        EmailTemplate {
            subject: "Cutting no-shows at {company}",
            hook: "Reviewing {company}'s online presence, the booking flow stood \
                   out as the place where patients and staff lose the most time.",
            invitation: "Open to a short conversation about automated scheduling \
                         and reminders for {company}?",
        },
    ),
    (
        BusinessCategory::Saas,
        InsightCategory::IndustrySpecific,
        EmailTemplate {
            subject: "{company}'s trial-to-paid funnel",
            hook: "I spent some time with {company}'s product pages and the \
                   onboarding journey looks like the highest-leverage place to \
                   invest right now.",
            invitation: "Would a walkthrough of the activation improvements I \
                         have in mind for {company} be useful?",
        },
    ),
    (
        BusinessCategory::Consulting,
        InsightCategory::IndustrySpecific,
        EmailTemplate {
            subject: "A lead-intake observation about {company}",
            hook: "Looking at how prospects reach {company}, qualification \
                   currently depends on manual back-and-forth that an intake \
                   workflow could absorb.",
            invitation: "Worth a brief call on what automated qualification \
                         could free up for {company}'s team?",
        },
    ),
];

/// Per-focus fallbacks used when no specialized pairing exists.
const GENERIC: &[(InsightCategory, EmailTemplate)] = &[
    (
        InsightCategory::TechnicalInfrastructure,
        EmailTemplate {
            subject: "Performance findings from {company}'s site",
            hook: "I ran a technical pass over {company}'s site and the \
                   infrastructure findings below are costing you visitors before \
                   the page even renders.",
            invitation: "Would a short technical walkthrough of these \
                         performance findings be useful?",
        },
    ),
    (
        InsightCategory::DigitalMarketing,
        EmailTemplate {
            subject: "What search engines see on {company}'s site",
            hook: "I reviewed how {company} shows up in search and a few \
                   fixable marketing gaps are holding back visibility.",
            invitation: "Happy to send the full search review for {company} - \
                         interested?",
        },
    ),
    (
        InsightCategory::ProcessAutomation,
        EmailTemplate {
            subject: "Manual work {company} could hand to software",
            hook: "From the outside, a few of {company}'s workflows look like \
                   they still run on manual effort that automation would absorb \
                   cleanly.",
            invitation: "Open to a quick conversation about which process to \
                         automate first?",
        },
    ),
    (
        InsightCategory::UserExperience,
        EmailTemplate {
            subject: "First impressions of {company}'s site",
            hook: "I went through {company}'s site the way a first-time visitor \
                   would, and a few experience issues get in the way of the \
                   content.",
            invitation: "Would a prioritized list of these usability fixes for \
                         {company} help?",
        },
    ),
    (
        InsightCategory::DataAnalytics,
        EmailTemplate {
            subject: "What {company} isn't measuring yet",
            hook: "While analyzing {company}'s site I noticed the data side: \
                   decisions about the site are being made without visitor \
                   analytics to back them.",
            invitation: "Want me to outline a minimal tracking setup that would \
                         answer {company}'s biggest questions?",
        },
    ),
    (
        InsightCategory::IndustrySpecific,
        EmailTemplate {
            subject: "An industry observation about {company}",
            hook: "Companies in {company}'s industry are pulling ahead on a \
                   capability your site suggests is still on the to-do list.",
            invitation: "Worth a short call to compare notes on where \
                         {company}'s peers are investing?",
        },
    ),
];

/// Resolve the template for a pairing, falling back per focus category. The
/// generic table covers every focus, so this always succeeds.
pub fn lookup(business: BusinessCategory, focus: InsightCategory) -> &'static EmailTemplate {
    if let Some((_, _, template)) = SPECIALIZED
        .iter()
        .find(|(b, f, _)| *b == business && *f == focus)
    {
        return template;
    }

    GENERIC
        .iter()
        .find(|(f, _)| *f == focus)
        .map(|(_, template)| template)
        .unwrap_or(&GENERIC[0].1)
}
