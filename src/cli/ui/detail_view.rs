use std::cmp;

use crate::cli::ui::formatting::Formatter;
use crate::core::RecordDetail;

/// Renders an archived record as a titled card with one line per section.
pub struct DetailView<'a> {
    detail: &'a RecordDetail,
}

impl<'a> DetailView<'a> {
    pub fn new(detail: &'a RecordDetail) -> Self {
        Self { detail }
    }

    pub fn render(&self, formatter: &Formatter) -> String {
        let category = self.detail.category;
        let width = self
            .detail
            .sections
            .iter()
            .map(|section| section.heading.chars().count())
            .max()
            .unwrap_or(0);
        let rule_len = cmp::max(
            40,
            cmp::max(
                self.detail.title.chars().count(),
                self.detail.header.chars().count(),
            ),
        );
        let rule = horizontal_rule(rule_len);

        let mut lines = vec![
            formatter.category_title(category, &self.detail.title),
            formatter.detail_text(&self.detail.header),
            rule.clone(),
        ];
        for section in &self.detail.sections {
            let padding = " ".repeat(width - section.heading.chars().count() + 2);
            lines.push(format!(
                "{}{}{}",
                formatter.category_title(category, section.heading),
                padding,
                formatter.category_value(category, &section.value)
            ));
        }
        lines.push(rule);
        lines.join("\n")
    }
}

fn horizontal_rule(len: usize) -> String {
    "─".repeat(len)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::output::OutputPreferences;
    use crate::domain::{WineCategory, WineRecord};

    #[test]
    fn plain_render_lists_every_section() {
        let record = WineRecord::new()
            .with_field("nome_bianco", "Soave")
            .with_field("qualita_bianco", "Eccellente");
        let detail = RecordDetail::from_record(WineCategory::White, 3, &record);
        let formatter = Formatter::with_preferences(OutputPreferences {
            plain_mode: true,
            high_contrast_mode: false,
        });

        let rendered = DetailView::new(&detail).render(&formatter);
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Soave");
        assert_eq!(lines.len(), 3 + detail.sections.len() + 1);
        assert!(rendered.contains("Persistenza / Qualità"));
        assert!(rendered.trim_end().ends_with(&"─".repeat(40)));
        assert!(lines
            .iter()
            .any(|line| line.starts_with("Persistenza / Qualità") && line.ends_with("Eccellente")));
    }
}
