use super::SiliconFlowImageGenerator;
use crate::{
    config::{StylePreset, MAX_STEPS, MIN_STEPS},
    error::Result,
    models::{ChoiceOption, FieldKind, SettingsField, SettingsForm},
};
use secrecy::ExposeSecret;
use std::collections::HashMap;

impl SiliconFlowImageGenerator {
    pub fn settings_view(&self) -> SettingsForm {
        let config = self.config();

        SettingsForm::new("siliconflow_settings", "SiliconFlow settings")
            .with_field(SettingsField {
                name: "api_key".to_string(),
                label: "API key".to_string(),
                kind: FieldKind::Secret,
                value: config.api_key.expose_secret().to_string(),
            })
            .with_field(SettingsField {
                name: "default_steps".to_string(),
                label: "Steps".to_string(),
                kind: FieldKind::Integer {
                    min: i64::from(MIN_STEPS),
                    max: i64::from(MAX_STEPS),
                },
                value: config.default_steps.to_string(),
            })
            .with_field(SettingsField {
                name: "default_style".to_string(),
                label: "Default style".to_string(),
                kind: FieldKind::Choice {
                    options: StylePreset::ALL
                        .iter()
                        .map(|style| ChoiceOption {
                            value: style.as_str().to_string(),
                            label: style.label().to_string(),
                        })
                        .collect(),
                },
                value: config.default_style.as_str().to_string(),
            })
    }

    pub fn settings_html(&self) -> String {
        self.settings_view().to_html()
    }

    /// Applies submitted settings-form values; see
    /// [`GenerationConfig::apply_settings`](crate::config::GenerationConfig::apply_settings).
    pub fn apply_settings(&self, values: &HashMap<String, String>) -> Result<()> {
        let mut config = match self.config.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        config.apply_settings(values)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GenerationConfig;

    fn generator() -> SiliconFlowImageGenerator {
        SiliconFlowImageGenerator::new(
            GenerationConfig::new()
                .with_api_key("sk-abc")
                .with_style(StylePreset::Photographic),
        )
        .unwrap()
    }

    #[test]
    fn test_settings_view_fields() {
        let form = generator().settings_view();
        let names: Vec<&str> = form.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["api_key", "default_steps", "default_style"]);

        assert_eq!(form.field("api_key").unwrap().kind, FieldKind::Secret);
        assert_eq!(
            form.field("default_steps").unwrap().kind,
            FieldKind::Integer { min: 20, max: 150 }
        );

        let style = form.field("default_style").unwrap();
        assert_eq!(style.value, "photographic");
        match &style.kind {
            FieldKind::Choice { options } => {
                let values: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
                assert_eq!(values, vec!["digital-art", "photographic", "fantasy-art"]);
            }
            other => panic!("unexpected kind: {:?}", other),
        }
    }

    #[test]
    fn test_settings_html() {
        let html = generator().settings_html();
        assert!(html.contains("<div class=\"siliconflow_settings\">"));
        assert!(html.contains("type=\"password\" name=\"api_key\" value=\"sk-abc\""));
        assert!(html.contains("name=\"default_steps\" value=\"50\" min=\"20\" max=\"150\""));
        assert!(html.contains("<option value=\"photographic\" selected>Photographic</option>"));
    }

    #[test]
    fn test_apply_settings_updates_view() {
        let generator = generator();
        let values: HashMap<String, String> =
            [("default_steps".to_string(), "25".to_string())].into_iter().collect();
        generator.apply_settings(&values).unwrap();

        assert_eq!(generator.config().default_steps, 25);
        assert_eq!(generator.settings_view().field("default_steps").unwrap().value, "25");
    }
}
