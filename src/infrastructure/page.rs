// HTML page served at the dashboard root
use std::collections::HashMap;

const INDEX_TEMPLATE: &str = include_str!("../../assets/index.html");

pub const PLOTLY_URL: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Replace `${name}` placeholders in a template
pub fn fill_template(template: &str, vars: &HashMap<&str, String>) -> String {
    let mut result = template.to_string();
    for (key, value) in vars {
        let placeholder = format!("${{{}}}", key);
        result = result.replace(&placeholder, value);
    }
    result
}

fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

pub fn render_index(title: &str) -> String {
    let mut vars = HashMap::new();
    vars.insert("title", escape_html(title));
    vars.insert("plotly_url", PLOTLY_URL.to_string());
    fill_template(INDEX_TEMPLATE, &vars)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fill_template() {
        let mut vars = HashMap::new();
        vars.insert("title", "Deer".to_string());
        vars.insert("zoom", "7".to_string());

        let result = fill_template("<h1>${title}</h1> zoom=${zoom} ${missing}", &vars);
        assert_eq!(result, "<h1>Deer</h1> zoom=7 ${missing}");
    }

    #[test]
    fn test_render_index() {
        let html = render_index("Maine's <Deer> Areas");

        assert!(html.contains("<title>Maine's &lt;Deer&gt; Areas</title>"));
        assert!(html.contains(PLOTLY_URL));
        assert!(html.contains("/api/dashboard"));
        assert!(!html.contains("${title}"));
        assert!(!html.contains("${plotly_url}"));
    }
}
