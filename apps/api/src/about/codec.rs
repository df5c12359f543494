//! Draft-buffer text formats for the About page.
//!
//! Skills are edited as one line per skill. Work experience is edited as
//! tagged key-value blocks; the older single-line pipe format
//! (`title | company | period | description`) is still accepted on input.

use super::models::WorkItem;

const TAG_TITLE: &str = "title";
const TAG_COMPANY: &str = "company";
const TAG_PERIOD: &str = "period";
const TAG_DESCRIPTION: &str = "description";
const KNOWN_TAGS: [&str; 4] = [TAG_TITLE, TAG_COMPANY, TAG_PERIOD, TAG_DESCRIPTION];

pub fn skills_to_text(skills: &[String]) -> String {
    skills.join("\n")
}

/// Splits on newlines, trims, and drops empty lines.
pub fn text_to_skills(text: &str) -> Vec<String> {
    text.split('\n')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Newlines inside a field would split the entry, so they become spaces.
fn flatten(value: &str) -> String {
    value.replace("\r\n", " ").replace('\n', " ")
}

// ────────────────────────────────────────────────────────────────────────────
// Tagged blocks
// ────────────────────────────────────────────────────────────────────────────

pub fn work_exp_to_text(items: &[WorkItem]) -> String {
    items
        .iter()
        .map(|item| {
            format!(
                "{TAG_TITLE}: {}\n{TAG_COMPANY}: {}\n{TAG_PERIOD}: {}\n{TAG_DESCRIPTION}: {}",
                flatten(&item.title),
                flatten(&item.company),
                flatten(&item.period),
                flatten(&item.description),
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[derive(Default)]
struct PartialItem {
    title: Option<String>,
    company: Option<String>,
    period: Option<String>,
    description: Option<String>,
}

impl PartialItem {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.company.is_none()
            && self.period.is_none()
            && self.description.is_none()
    }

    fn slot(&mut self, tag: &str) -> Option<&mut Option<String>> {
        match tag {
            TAG_TITLE => Some(&mut self.title),
            TAG_COMPANY => Some(&mut self.company),
            TAG_PERIOD => Some(&mut self.period),
            TAG_DESCRIPTION => Some(&mut self.description),
            _ => None,
        }
    }

    fn finish(self) -> WorkItem {
        WorkItem {
            title: self.title.unwrap_or_default(),
            company: self.company.unwrap_or_default(),
            period: self.period.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
        }
    }
}

fn split_tag(line: &str) -> Option<(String, &str)> {
    let (key, value) = line.split_once(':')?;
    let key = key.trim().to_ascii_lowercase();
    KNOWN_TAGS
        .iter()
        .any(|tag| *tag == key)
        .then(|| (key, value.trim()))
}

/// Parses tagged blocks. A blank line or a repeated tag closes the current
/// block. A line without a known tag continues the value of the last tag in
/// the block, joined with a space, and is ignored when no tag is open yet.
/// Blocks without a title are dropped.
pub fn tagged_text_to_work_exp(text: &str) -> Vec<WorkItem> {
    let mut blocks = Vec::new();
    let mut current = PartialItem::default();
    let mut last_tag: Option<String> = None;

    for line in text.lines() {
        if line.trim().is_empty() {
            if !current.is_empty() {
                blocks.push(std::mem::take(&mut current));
            }
            last_tag = None;
            continue;
        }
        let Some((tag, value)) = split_tag(line) else {
            if let Some(tag) = last_tag.as_deref() {
                if let Some(Some(open)) = current.slot(tag) {
                    if !open.is_empty() {
                        open.push(' ');
                    }
                    open.push_str(line.trim());
                }
            }
            continue;
        };
        if current.slot(&tag).is_some_and(|slot| slot.is_some()) {
            blocks.push(std::mem::take(&mut current));
        }
        if let Some(slot) = current.slot(&tag) {
            *slot = Some(value.to_string());
        }
        last_tag = Some(tag);
    }
    if !current.is_empty() {
        blocks.push(current);
    }

    blocks
        .into_iter()
        .map(PartialItem::finish)
        .filter(|item| !item.title.is_empty())
        .collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Legacy pipe lines
// ────────────────────────────────────────────────────────────────────────────

pub fn work_exp_to_pipe_text(items: &[WorkItem]) -> String {
    items
        .iter()
        .map(|item| {
            format!(
                "{} | {} | {} | {}",
                item.title,
                item.company,
                item.period,
                flatten(&item.description)
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Positional split on `|`. Missing parts are empty and extra parts are
/// ignored, so a `|` inside a field shifts every later field.
pub fn pipe_text_to_work_exp(text: &str) -> Vec<WorkItem> {
    text.split('\n')
        .map(|line| {
            let mut parts = line.split('|').map(str::trim);
            let mut next = || parts.next().unwrap_or_default().to_string();
            WorkItem {
                title: next(),
                company: next(),
                period: next(),
                description: next(),
            }
        })
        .filter(|item| !item.title.is_empty())
        .collect()
}

/// Accepts either draft format. Text counts as tagged when any line starts
/// with a known tag.
pub fn text_to_work_exp(text: &str) -> Vec<WorkItem> {
    if text.lines().any(|line| split_tag(line).is_some()) {
        tagged_text_to_work_exp(text)
    } else {
        pipe_text_to_work_exp(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::about::models::default_work_experience;

    fn item(title: &str, company: &str, period: &str, description: &str) -> WorkItem {
        WorkItem {
            title: title.to_string(),
            company: company.to_string(),
            period: period.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_skills_round_trip() {
        let skills = vec!["Rust".to_string(), "Tokio".to_string(), "Axum 0.7".to_string()];
        assert_eq!(text_to_skills(&skills_to_text(&skills)), skills);
        assert_eq!(text_to_skills(&skills_to_text(&[])), Vec::<String>::new());
    }

    #[test]
    fn test_text_to_skills_trims_and_drops_blank_lines() {
        let parsed = text_to_skills("  React \n\n   \nVue.js\r\n");
        assert_eq!(parsed, vec!["React".to_string(), "Vue.js".to_string()]);
    }

    #[test]
    fn test_pipe_round_trip() {
        let items = default_work_experience();
        assert_eq!(pipe_text_to_work_exp(&work_exp_to_pipe_text(&items)), items);
    }

    #[test]
    fn test_pipe_encode_flattens_description_newlines() {
        let items = vec![item("Dev", "Acme", "2020", "line one\nline two")];
        assert_eq!(work_exp_to_pipe_text(&items), "Dev | Acme | 2020 | line one line two");
    }

    #[test]
    fn test_pipe_missing_parts_default_to_empty() {
        let parsed = pipe_text_to_work_exp("Engineer | Initech");
        assert_eq!(parsed, vec![item("Engineer", "Initech", "", "")]);
    }

    #[test]
    fn test_pipe_drops_lines_without_title() {
        let parsed = pipe_text_to_work_exp(" | Acme | 2020 | x\n\nDev | Co | 2021 | y");
        assert_eq!(parsed, vec![item("Dev", "Co", "2021", "y")]);
    }

    #[test]
    fn test_pipe_inside_field_shifts_later_fields() {
        // Known defect of the pipe format; the tagged format does not have it.
        let parsed = pipe_text_to_work_exp("Dev | R|D Labs | 2020 | x");
        assert_eq!(parsed[0].company, "R");
        assert_eq!(parsed[0].period, "D Labs");
    }

    #[test]
    fn test_tagged_round_trip() {
        let items = default_work_experience();
        assert_eq!(tagged_text_to_work_exp(&work_exp_to_text(&items)), items);
    }

    #[test]
    fn test_tagged_keeps_pipes_and_colons() {
        let items = vec![item("Dev | Ops", "R|D Labs", "2020 - 2021", "Uptime: 99.99%")];
        assert_eq!(text_to_work_exp(&work_exp_to_text(&items)), items);
    }

    #[test]
    fn test_tagged_repeated_tag_starts_new_block() {
        let text = "title: A\ncompany: X\ntitle: B\nperiod: 2024";
        let parsed = tagged_text_to_work_exp(text);
        assert_eq!(parsed, vec![item("A", "X", "", ""), item("B", "", "2024", "")]);
    }

    #[test]
    fn test_tagged_ignores_loose_lines_and_untitled_blocks() {
        let text = "notes before any tag\nTitle: Lead\n\nstray line\n\ncompany: Orphan Co";
        let parsed = tagged_text_to_work_exp(text);
        assert_eq!(parsed, vec![item("Lead", "", "", "")]);
    }

    #[test]
    fn test_tagged_untagged_line_continues_last_value() {
        let text = "title: Lead\ncompany: Acme\nperiod: 2024\ndescription: Built the platform.\n  Shipped v2 to 1M users.\nsalary: lots";
        let parsed = text_to_work_exp(text);
        assert_eq!(
            parsed,
            vec![item(
                "Lead",
                "Acme",
                "2024",
                "Built the platform. Shipped v2 to 1M users. salary: lots"
            )]
        );
    }

    #[test]
    fn test_tagged_continuation_fills_empty_value() {
        let parsed = tagged_text_to_work_exp("title: Lead\ndescription:\nFirst line\nsecond line");
        assert_eq!(parsed, vec![item("Lead", "", "", "First line second line")]);
    }

    #[test]
    fn test_auto_detect_prefers_pipe_for_untagged_text() {
        let parsed = text_to_work_exp("Dev | Acme | 2020 | note: shipped");
        assert_eq!(parsed, vec![item("Dev", "Acme", "2020", "note: shipped")]);
    }

    #[test]
    fn test_empty_draft_is_empty_list() {
        assert!(text_to_work_exp("").is_empty());
        assert!(text_to_work_exp("\n\n").is_empty());
    }
}
