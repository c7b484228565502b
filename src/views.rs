//! HTML rendering. Templates are compiled into the binary as plain format
//! strings; a missing template cannot occur at runtime.

use axum::response::Html;

use crate::models::{Diagnostic, Injury};
use crate::routes;

/// Escape a value for interpolation into HTML text or attributes.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Shared page shell: header, navigation, content, footer.
fn layout(title: &str, content: &str) -> Html<String> {
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
</head>
<body>
<header>
<h1>Athletic Trainer</h1>
<nav>
<a href="{home}">Home</a>
<a href="{injuries}">Injuries</a>
<a href="{diagnostic}">Diagnostic</a>
<a href="{about}">About Us</a>
</nav>
</header>
<main>
{content}
</main>
<footer>
<p>Athletic Trainer &mdash; sports injury reference</p>
</footer>
</body>
</html>
"#,
        title = escape_html(title),
        home = routes::HOME,
        injuries = routes::INJURIES,
        diagnostic = routes::DIAGNOSTIC,
        about = routes::ABOUT,
    ))
}

pub fn home_page() -> Html<String> {
    let content = format!(
        r#"<h2>Welcome</h2>
<p>Look up common sports injuries, or answer a few questions to get a
suggested diagnosis for a body part.</p>
<form action="{search}" method="post">
<label for="action">Search injuries by keyword:</label>
<input type="text" id="action" name="action" placeholder="e.g. ankle, groin, elbow">
<button type="submit">Search</button>
</form>"#,
        search = routes::INJURIES_SEARCH,
    );
    layout("Home - Athletic Trainer", &content)
}

pub fn about_page() -> Html<String> {
    let content = r#"<h2>About Us</h2>
<p>Athletic Trainer is a small reference site for common sports injuries,
their descriptions, and suggested treatments. It is not a substitute for
professional medical advice.</p>"#;
    layout("About Us - Athletic Trainer", content)
}

/// The injuries page renders three states: no keyword entered, keyword with
/// no matches, and a result list.
///
/// `term` must already be sanitized by the input accessor; it is interpolated
/// as given. Store-sourced fields are escaped here.
pub fn injuries_page(term: Option<&str>, results: &[Injury]) -> Html<String> {
    match term {
        None if results.is_empty() => layout(
            "Injuries - Athletic Trainer",
            "<p>No keyword entered. Please go back to the home page to search \
             for a keyword.</p>",
        ),
        // The index page (no term, all rows) reuses the list rendering.
        None => layout("All Injuries - Athletic Trainer", &render_injury_list(results)),
        Some(term) if results.is_empty() => layout(
            "Search Results - Athletic Trainer",
            &format!(
                "<p>No match found for <strong>{term}</strong>. Our database is \
                 growing every day, so please check again later for that keyword.<br>\
                 In the meantime, you can search for keywords such as groin, elbow, \
                 thighs, etc...</p>"
            ),
        ),
        Some(_) => layout("Search Results - Athletic Trainer", &render_injury_list(results)),
    }
}

fn render_injury_list(results: &[Injury]) -> String {
    let mut body = String::from("<p>Below are the results of your query:</p>\n<ul>\n");
    for injury in results {
        let name = escape_html(&injury.name);
        let description = escape_html(&injury.description);
        let treatment = escape_html(&injury.treatment);
        let heading = match &injury.reference_link {
            Some(link) if !link.is_empty() => {
                format!(r#"<a href="{}">{}</a>"#, escape_html(link), name)
            }
            _ => name,
        };
        body.push_str(&format!(
            "<li>\n<h3>{heading}</h3>\n<p>{description}</p>\n\
             <p><em>Treatment:</em> {treatment}</p>\n</li>\n"
        ));
    }
    body.push_str("</ul>");
    body
}

/// The questionnaire page. The yes/no walk itself is client-side and
/// stateless; each outcome submits the body-part label through the `action`
/// field.
pub fn diagnostic_page() -> Html<String> {
    let mut content = String::from(
        "<h2>Diagnostic</h2>\n\
         <p>Where does it hurt? Pick a body part and we will suggest a \
         possible diagnosis.</p>\n",
    );
    for label in [
        "Ankle sprain",
        "Ankle",
        "Elbow",
        "Groin",
        "Neck",
        "Thighs",
        "Knee",
    ] {
        content.push_str(&format!(
            "<form action=\"{result}\" method=\"post\">\n\
             <button type=\"submit\" name=\"action\" value=\"{label}\">{label}</button>\n\
             </form>\n",
            result = routes::DIAGNOSTIC_RESULT,
        ));
    }
    layout("Diagnostic - Athletic Trainer", &content)
}

/// `body_part` must already be sanitized by the input accessor.
pub fn diagnostic_result_page(diagnostic: &Diagnostic, body_part: &str) -> Html<String> {
    let content = format!(
        "<h2>Suggested diagnosis for {body_part}</h2>\n\
         <h3>{name}</h3>\n\
         <p>{description}</p>\n\
         <p><a href=\"{diagnostic_page}\">Start over</a></p>",
        name = escape_html(&diagnostic.name),
        description = escape_html(&diagnostic.description),
        diagnostic_page = routes::DIAGNOSTIC,
    );
    layout("Diagnostic Result - Athletic Trainer", &content)
}

pub fn not_found_page() -> Html<String> {
    let content = format!(
        "<h2>404 - Page Not Found</h2>\n\
         <p>The page you are looking for does not exist.</p>\n\
         <p><a href=\"{home}\">Go to Home</a></p>",
        home = routes::HOME,
    );
    layout("404 - Page Not Found", &content)
}

/// The 500 page. `detail` is only passed in debug-enabled instances; the
/// production rendering stays generic.
pub fn server_error_page(detail: Option<&str>) -> Html<String> {
    let message = match detail {
        Some(detail) => escape_html(detail),
        None => "An unexpected error occurred.".to_string(),
    };
    let content = format!(
        "<h2>500 - Server Error</h2>\n\
         <p>{message}</p>\n\
         <p><a href=\"{home}\">Go to Home</a></p>",
        home = routes::HOME,
    );
    layout("500 - Server Error", &content)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn injury(name: &str, link: Option<&str>) -> Injury {
        Injury {
            id: 1,
            name: name.to_string(),
            description: format!("{name} description"),
            treatment: format!("{name} treatment"),
            reference_link: link.map(str::to_string),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("plain"), "plain");
        assert_eq!(
            escape_html(r#"<a href="x">&'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;&amp;&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn test_injuries_page_no_keyword_state() {
        let Html(page) = injuries_page(None, &[]);
        assert!(page.contains("No keyword entered"));
        assert!(page.contains("<title>Injuries - Athletic Trainer</title>"));
    }

    #[test]
    fn test_injuries_page_no_match_state_echoes_term() {
        let Html(page) = injuries_page(Some("wrist"), &[]);
        assert!(page.contains("No match found for <strong>wrist</strong>"));
        assert!(page.contains("<title>Search Results - Athletic Trainer</title>"));
    }

    #[test]
    fn test_injuries_page_result_state() {
        let rows = [injury("Ankle Sprain", None), injury("Bankle", Some("/view/bankle"))];
        let Html(page) = injuries_page(Some("ankle"), &rows);
        assert!(page.contains("Below are the results"));
        assert!(page.contains("Ankle Sprain"));
        assert!(page.contains(r#"<a href="/view/bankle">Bankle</a>"#));
    }

    #[test]
    fn test_injuries_page_index_state_lists_all() {
        let rows = [injury("Ankle Sprain", None)];
        let Html(page) = injuries_page(None, &rows);
        assert!(page.contains("<title>All Injuries - Athletic Trainer</title>"));
        assert!(page.contains("Ankle Sprain"));
    }

    #[test]
    fn test_injury_fields_are_escaped() {
        let rows = [injury("<b>Ankle</b>", None)];
        let Html(page) = injuries_page(Some("ankle"), &rows);
        assert!(page.contains("&lt;b&gt;Ankle&lt;/b&gt;"));
        assert!(!page.contains("<b>Ankle</b>"));
    }

    #[test]
    fn test_diagnostic_page_lists_body_parts() {
        let Html(page) = diagnostic_page();
        for label in ["Ankle sprain", "Elbow", "Groin", "Neck", "Thighs", "Knee"] {
            assert!(page.contains(label), "missing body part {label}");
        }
        assert!(page.contains(routes::DIAGNOSTIC_RESULT));
    }

    #[test]
    fn test_diagnostic_result_page() {
        let diagnostic = Diagnostic {
            id: 7,
            name: "Ankle ligament tear".to_string(),
            description: "Pain on the outer ankle".to_string(),
        };
        let Html(page) = diagnostic_result_page(&diagnostic, "Ankle sprain");
        assert!(page.contains("Suggested diagnosis for Ankle sprain"));
        assert!(page.contains("Ankle ligament tear"));
        assert!(page.contains("Pain on the outer ankle"));
    }

    #[test]
    fn test_error_pages() {
        let Html(page) = not_found_page();
        assert!(page.contains("404 - Page Not Found"));

        let Html(page) = server_error_page(None);
        assert!(page.contains("An unexpected error occurred."));

        let Html(page) = server_error_page(Some("template <x> exploded"));
        assert!(page.contains("template &lt;x&gt; exploded"));
    }
}
