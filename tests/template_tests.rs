//! Dashboard page rendering.

use serde_json::json;
use timeit::server::template::{HomeData, render_home};

fn embedded_payload(page: &str) -> &str {
    let marker = r#"id="activity-data">"#;
    let start = page.find(marker).unwrap() + marker.len();
    let end = start + page[start..].find("</script>").unwrap();
    &page[start..end]
}

#[test]
fn test_activity_markup_cannot_break_out_of_the_data_block() {
    let hostile = "</script><script>alert(1)</script>";
    let payload = serde_json::to_string(&json!({
        "todays_data": { "series": [1.0], "labels": [hostile] }
    }))
    .unwrap();

    let page = render_home(&HomeData {
        active_session: Some(hostile.to_string()),
        year_options: vec![2024],
        current_year: 2024,
        payload,
    });

    // The injected terminator never appears literally in the page.
    assert!(!page.contains("</script><script>alert(1)"));
    assert!(page.contains("\\u003c/script\\u003e"));
    // The session banner escapes it as HTML entities instead.
    assert!(page.contains("&lt;/script&gt;"));

    // The block still parses back to the original value.
    let embedded: serde_json::Value = serde_json::from_str(embedded_payload(&page)).unwrap();
    assert_eq!(embedded["todays_data"]["labels"][0], hostile);
}

#[test]
fn test_selected_year_marked_in_year_options() {
    let page = render_home(&HomeData {
        active_session: None,
        year_options: vec![2023, 2024, 2025],
        current_year: 2024,
        payload: "{}".to_string(),
    });

    assert!(page.contains(r#"<option value="2024" selected>2024</option>"#));
    assert!(page.contains(r#"<option value="2023">2023</option>"#));
    assert!(page.contains("start-session-form"));
}
