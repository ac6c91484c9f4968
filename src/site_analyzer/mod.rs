pub mod signatures;
pub mod types;

use crate::fetcher::FetchedPage;
use scraper::{Html, Selector};
use signatures::{CATEGORY_KEYWORDS, TECH_SIGNATURES};
use tracing::{debug, info};
use types::{
    BusinessCategory, PerformanceMetrics, ResourceCounts, SeoCheck, TechnicalAnalysis,
};

pub const SEO_CHECK_NAMES: &[&str] = &[
    "title",
    "meta_description",
    "single_h1",
    "image_alts",
    "canonical",
];

const CONTENT_EXCERPT_CHARS: usize = 2000;

/// Analyze a fetched page. Never fails: unreadable or empty markup yields an
/// all-unknown analysis instead.
pub fn analyze(page: &FetchedPage, performance: PerformanceMetrics) -> TechnicalAnalysis {
    if page.html.trim().is_empty() {
        debug!("Empty markup from {}, recording unknown analysis", page.url);
        return TechnicalAnalysis::unknown(&page.url);
    }

    let document = Html::parse_document(&page.html);

    let title = select_text(&document, "title");
    let meta_description = select_attr(&document, r#"meta[name="description"]"#, "content");
    let headings = collect_headings(&document);
    let content_excerpt = extract_excerpt(&document);
    let tech_tags = detect_tech_tags(&page.html);
    let resources = count_resources(&document);
    let seo_checks = run_seo_checks(&document, &title, &meta_description);
    let business_category = classify(&content_excerpt);

    info!(
        "Analyzed {}: category={}, {} tech tags, {} headings",
        page.url,
        business_category.as_str(),
        tech_tags.len(),
        headings.len()
    );

    TechnicalAnalysis {
        url: page.url.clone(),
        title,
        meta_description,
        headings,
        tech_tags,
        seo_checks,
        performance,
        resources,
        business_category,
        content_excerpt,
    }
}

fn select_text(document: &Html, selector: &str) -> String {
    let sel = Selector::parse(selector).unwrap();
    document
        .select(&sel)
        .next()
        .map(|e| e.text().collect::<String>().trim().to_string())
        .unwrap_or_default()
}

fn select_attr(document: &Html, selector: &str, attr: &str) -> String {
    let sel = Selector::parse(selector).unwrap();
    document
        .select(&sel)
        .next()
        .and_then(|e| e.value().attr(attr))
        .map(|v| v.trim().to_string())
        .unwrap_or_default()
}

fn collect_headings(document: &Html) -> Vec<String> {
    let sel = Selector::parse("h1, h2, h3, h4").unwrap();
    document
        .select(&sel)
        .map(|e| e.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty() && t.len() < 200)
        .collect()
}

fn extract_excerpt(document: &Html) -> String {
    let sel = Selector::parse("body").unwrap();
    let text = document
        .select(&sel)
        .next()
        .map(|body| body.text().collect::<Vec<_>>().join(" "))
        .unwrap_or_default();

    let collapsed = text.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.chars().take(CONTENT_EXCERPT_CHARS).collect()
}

fn detect_tech_tags(html: &str) -> Vec<String> {
    let source = html.to_lowercase();
    let mut tags = Vec::new();
    for (tag, patterns) in TECH_SIGNATURES {
        if patterns.iter().any(|p| source.contains(p)) {
            tags.push((*tag).to_string());
        }
    }
    tags
}

fn count_resources(document: &Html) -> ResourceCounts {
    let scripts = Selector::parse("script[src]").unwrap();
    let stylesheets = Selector::parse(r#"link[rel="stylesheet"]"#).unwrap();
    let images = Selector::parse("img").unwrap();

    ResourceCounts {
        scripts: document.select(&scripts).count(),
        stylesheets: document.select(&stylesheets).count(),
        images: document.select(&images).count(),
    }
}

fn run_seo_checks(document: &Html, title: &str, meta_description: &str) -> Vec<SeoCheck> {
    let mut checks = Vec::with_capacity(SEO_CHECK_NAMES.len());

    // Length bounds are in characters, not bytes.
    let title_chars = title.chars().count();
    checks.push(if title.is_empty() {
        SeoCheck::fail("title", "missing title tag")
    } else if title_chars < 30 || title_chars > 60 {
        SeoCheck::fail("title", format!("title length {title_chars} outside 30-60"))
    } else {
        SeoCheck::pass("title")
    });

    let description_chars = meta_description.chars().count();
    checks.push(if meta_description.is_empty() {
        SeoCheck::fail("meta_description", "missing meta description")
    } else if description_chars < 120 || description_chars > 160 {
        SeoCheck::fail(
            "meta_description",
            format!("description length {description_chars} outside 120-160"),
        )
    } else {
        SeoCheck::pass("meta_description")
    });

    let h1_count = document.select(&Selector::parse("h1").unwrap()).count();
    checks.push(match h1_count {
        0 => SeoCheck::fail("single_h1", "missing h1 tag"),
        1 => SeoCheck::pass("single_h1"),
        n => SeoCheck::fail("single_h1", format!("{n} h1 tags found")),
    });

    let img_sel = Selector::parse("img").unwrap();
    let total_images = document.select(&img_sel).count();
    let missing_alt = document
        .select(&img_sel)
        .filter(|img| img.value().attr("alt").map_or(true, |a| a.trim().is_empty()))
        .count();
    checks.push(if total_images == 0 {
        SeoCheck::pass("image_alts")
    } else if missing_alt > 0 {
        SeoCheck::fail("image_alts", format!("{missing_alt} images missing alt text"))
    } else {
        SeoCheck::pass("image_alts")
    });

    let canonical = Selector::parse(r#"link[rel="canonical"]"#).unwrap();
    checks.push(if document.select(&canonical).next().is_some() {
        SeoCheck::pass("canonical")
    } else {
        SeoCheck::fail("canonical", "no canonical link")
    });

    checks
}

/// Score each category by keyword occurrence in the visible text. Highest
/// score wins; ties go to the earlier entry in the table; zero means Other.
fn classify(content: &str) -> BusinessCategory {
    let text = content.to_lowercase();
    let mut best = BusinessCategory::Other;
    let mut best_score = 0usize;

    for (category, keywords) in CATEGORY_KEYWORDS {
        let score: usize = keywords.iter().map(|k| text.matches(k).count()).sum();
        if score > best_score {
            best = *category;
            best_score = score;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;
    use types::CheckStatus;

    fn page(html: &str) -> FetchedPage {
        FetchedPage {
            url: "https://acme.com".to_string(),
            html: html.to_string(),
        }
    }

    #[test]
    fn empty_markup_yields_unknown_analysis() {
        let analysis = analyze(&page("   "), PerformanceMetrics::default());
        assert!(analysis.is_unknown());
        assert_eq!(analysis.business_category, BusinessCategory::Other);
        assert!(analysis.tech_tags.is_empty());
    }

    #[test]
    fn detects_tech_and_classifies_ecommerce() {
        let html = r#"<html><head><title>Acme Store - quality goods online shop</title>
            <script src="https://js.stripe.com/v3"></script></head>
            <body><h1>Shop</h1>
            <p>Add to cart and checkout. Our store ships every product fast.
            Buy now, cart, checkout, order today.</p></body></html>"#;
        let analysis = analyze(&page(html), PerformanceMetrics::default());
        assert_eq!(analysis.business_category, BusinessCategory::Ecommerce);
        assert!(analysis.has_tech("stripe"));
    }

    #[test]
    fn flags_missing_meta_description() {
        let html = "<html><head><title>t</title></head><body><h1>Hi</h1></body></html>";
        let analysis = analyze(&page(html), PerformanceMetrics::default());
        let check = analysis.failed_check("meta_description").unwrap();
        assert_eq!(check.status, CheckStatus::Fail);
    }

    #[test]
    fn multiple_h1_fails_the_check() {
        let html = "<html><body><h1>a</h1><h1>b</h1></body></html>";
        let analysis = analyze(&page(html), PerformanceMetrics::default());
        assert!(analysis.failed_check("single_h1").is_some());
    }

    #[test]
    fn keyword_tie_resolves_to_earlier_category() {
        // One ecommerce keyword, one saas keyword: ecommerce declared first.
        let html = "<html><body><p>cart platform</p></body></html>";
        let analysis = analyze(&page(html), PerformanceMetrics::default());
        assert_eq!(analysis.business_category, BusinessCategory::Ecommerce);
    }

    #[test]
    fn title_and_description_bounds_count_characters() {
        // 40 two-byte characters: 80 bytes, 40 chars. Must pass the 30-60
        // bound; same for a 130-char accented description against 120-160.
        let title = "é".repeat(40);
        let description = "ü".repeat(130);
        let html = format!(
            r#"<html><head><title>{title}</title>
            <meta name="description" content="{description}"></head>
            <body><h1>Hi</h1></body></html>"#
        );
        let analysis = analyze(&page(&html), PerformanceMetrics::default());
        assert!(analysis.failed_check("title").is_none());
        assert!(analysis.failed_check("meta_description").is_none());
    }

    #[test]
    fn no_keywords_means_other() {
        let html = "<html><body><p>hello world nothing relevant here</p></body></html>";
        let analysis = analyze(&page(html), PerformanceMetrics::default());
        assert_eq!(analysis.business_category, BusinessCategory::Other);
    }
}
