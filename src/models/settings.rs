use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum FieldKind {
    /// Rendered as a masked input.
    Secret,
    Integer { min: i64, max: i64 },
    Choice { options: Vec<ChoiceOption> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChoiceOption {
    pub value: String,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsField {
    pub name: String,
    pub label: String,
    pub kind: FieldKind,
    pub value: String,
}

/// Description of the configuration form a host renders for a generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SettingsForm {
    pub id: String,
    pub title: String,
    pub fields: Vec<SettingsField>,
}

impl SettingsForm {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            fields: Vec::new(),
        }
    }

    pub fn with_field(mut self, field: SettingsField) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field(&self, name: &str) -> Option<&SettingsField> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        html.push_str(&format!("<div class=\"{}\">\n", escape_html(&self.id)));
        html.push_str(&format!("    <h4>{}</h4>\n", escape_html(&self.title)));

        for field in &self.fields {
            html.push_str("    <label>\n");
            html.push_str(&format!("        {}:\n", escape_html(&field.label)));
            html.push_str(&render_input(field));
            html.push_str("    </label>\n");
        }

        html.push_str("</div>\n");
        html
    }
}

fn render_input(field: &SettingsField) -> String {
    let name = escape_html(&field.name);
    let value = escape_html(&field.value);

    match &field.kind {
        FieldKind::Secret => format!(
            "        <input type=\"password\" name=\"{}\" value=\"{}\">\n",
            name, value
        ),
        FieldKind::Integer { min, max } => format!(
            "        <input type=\"number\" name=\"{}\" value=\"{}\" min=\"{}\" max=\"{}\">\n",
            name, value, min, max
        ),
        FieldKind::Choice { options } => {
            let mut select = format!("        <select name=\"{}\">\n", name);
            for option in options {
                let selected = if option.value == field.value {
                    " selected"
                } else {
                    ""
                };
                select.push_str(&format!(
                    "            <option value=\"{}\"{}>{}</option>\n",
                    escape_html(&option.value),
                    selected,
                    escape_html(&option.label)
                ));
            }
            select.push_str("        </select>\n");
            select
        }
    }
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
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

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_form() -> SettingsForm {
        SettingsForm::new("demo_settings", "Demo")
            .with_field(SettingsField {
                name: "api_key".into(),
                label: "API key".into(),
                kind: FieldKind::Secret,
                value: "a\"b<c>".into(),
            })
            .with_field(SettingsField {
                name: "mode".into(),
                label: "Mode".into(),
                kind: FieldKind::Choice {
                    options: vec![
                        ChoiceOption {
                            value: "fast".into(),
                            label: "Fast".into(),
                        },
                        ChoiceOption {
                            value: "slow".into(),
                            label: "Slow".into(),
                        },
                    ],
                },
                value: "slow".into(),
            })
    }

    #[test]
    fn test_html_escapes_values() {
        let html = sample_form().to_html();
        assert!(html.contains("value=\"a&quot;b&lt;c&gt;\""));
        assert!(!html.contains("a\"b<c>"));
    }

    #[test]
    fn test_html_marks_selected_choice() {
        let html = sample_form().to_html();
        assert!(html.contains("<option value=\"slow\" selected>Slow</option>"));
        assert!(html.contains("<option value=\"fast\">Fast</option>"));
    }

    #[test]
    fn test_field_lookup() {
        let form = sample_form();
        assert_eq!(form.field("mode").map(|f| f.value.as_str()), Some("slow"));
        assert!(form.field("missing").is_none());
    }
}
