//! HTML pages rendered with minijinja.
//!
//! Templates live in `templates/` and are compiled into the binary. Names
//! end in `.html`, so every interpolated value is HTML-escaped.

use std::sync::LazyLock;

use axum::response::Html;
use minijinja::Environment;
use serde::Serialize;

use crate::services::nutrition_service::{NutritionError, NutritionOutcome};

static TEMPLATES: LazyLock<Environment<'static>> = LazyLock::new(|| {
    let mut env = Environment::new();
    let sources = [
        ("layout.html", include_str!("../templates/layout.html")),
        ("order.html", include_str!("../templates/order.html")),
        ("nutrition.html", include_str!("../templates/nutrition.html")),
        ("error.html", include_str!("../templates/error.html")),
    ];
    for (name, source) in sources {
        if let Err(e) = env.add_template(name, source) {
            tracing::error!(template = name, error = %e, "Failed to load template");
        }
    }
    env
});

pub fn render<T: Serialize>(name: &str, ctx: &T) -> Result<Html<String>, minijinja::Error> {
    let template = TEMPLATES.get_template(name)?;
    Ok(Html(template.render(ctx)?))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeKind {
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct OrderPage<'a> {
    pub catalog: &'a [String],
    pub name_on_order: &'a str,
    pub selected: &'a [String],
    pub max_selections: usize,
    pub notice: Option<Notice>,
    pub nutrition_enabled: bool,
    pub source: &'a str,
    /// `None` hides the connection details panel.
    pub diagnostics: Option<Vec<String>>,
}

#[derive(Debug, Serialize)]
pub struct ErrorPage {
    pub message: String,
    pub diagnostics: Vec<String>,
    pub nutrition_enabled: bool,
}

#[derive(Debug, Serialize)]
pub struct NutritionPage<'a> {
    pub fruit: &'a str,
    pub result: Option<NutritionView>,
    pub nutrition_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldRow {
    pub key: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum NutritionView {
    Found { rows: Vec<FieldRow>, raw: String },
    Status { status: u16 },
    Error { message: String },
}

impl NutritionView {
    pub fn from_lookup(result: Result<NutritionOutcome, NutritionError>) -> Self {
        match result {
            Ok(NutritionOutcome::Found(value)) => {
                let rows = match &value {
                    serde_json::Value::Object(map) => map
                        .iter()
                        .map(|(key, value)| FieldRow {
                            key: key.clone(),
                            value: match value {
                                serde_json::Value::String(s) => s.clone(),
                                other => other.to_string(),
                            },
                        })
                        .collect(),
                    _ => Vec::new(),
                };
                let raw = serde_json::to_string_pretty(&value).unwrap_or_else(|_| value.to_string());
                NutritionView::Found { rows, raw }
            }
            Ok(NutritionOutcome::Status(status)) => NutritionView::Status {
                status: status.as_u16(),
            },
            Err(e) => NutritionView::Error {
                message: e.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use serde_json::json;

    use super::*;

    #[test]
    fn every_template_renders() {
        let catalog = vec!["Kiwi".to_string()];
        let order = OrderPage {
            catalog: &catalog,
            name_on_order: "",
            selected: &[],
            max_selections: 5,
            notice: None,
            nutrition_enabled: true,
            source: "secrets",
            diagnostics: Some(Vec::new()),
        };
        assert!(render("order.html", &order).is_ok());

        let nutrition = NutritionPage {
            fruit: "",
            result: None,
            nutrition_enabled: true,
        };
        assert!(render("nutrition.html", &nutrition).is_ok());

        let error = ErrorPage {
            message: "down".to_string(),
            diagnostics: vec!["secrets: not configured".to_string()],
            nutrition_enabled: false,
        };
        assert!(render("error.html", &error).is_ok());
    }

    #[test]
    fn order_page_escapes_user_text() {
        let catalog = vec!["Kiwi".to_string()];
        let order = OrderPage {
            catalog: &catalog,
            name_on_order: "<script>alert(1)</script>",
            selected: &[],
            max_selections: 5,
            notice: None,
            nutrition_enabled: false,
            source: "secrets",
            diagnostics: None,
        };

        let Html(html) = render("order.html", &order).unwrap();
        assert!(html.contains("&lt;script&gt;alert(1)"));
        assert!(!html.contains("<script>alert(1)"));
        assert!(!html.contains("Connection details"));
    }

    #[test]
    fn object_bodies_become_rows() {
        let view = NutritionView::from_lookup(Ok(NutritionOutcome::Found(json!({
            "name": "Kiwi",
            "nutrition": { "calories": 61 }
        }))));

        match view {
            NutritionView::Found { rows, raw } => {
                assert_eq!(
                    rows,
                    vec![
                        FieldRow {
                            key: "name".to_string(),
                            value: "Kiwi".to_string()
                        },
                        FieldRow {
                            key: "nutrition".to_string(),
                            value: "{\"calories\":61}".to_string()
                        },
                    ]
                );
                assert!(raw.contains("\"calories\": 61"));
            }
            other => panic!("expected rows, got {other:?}"),
        }
    }

    #[test]
    fn non_ok_status_keeps_only_the_code() {
        let view = NutritionView::from_lookup(Ok(NutritionOutcome::Status(StatusCode::NOT_FOUND)));
        assert_eq!(view, NutritionView::Status { status: 404 });
    }
}
