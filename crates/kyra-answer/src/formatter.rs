//! SourceFormatter: appends or rewrites the sources section of a generated
//! answer and decides how the answer is attributed.

use kyra_core::models::{AnswerMetadata, Attribution};
use tracing::debug;

const KNOWLEDGE_BASE_HEADER: &str = "**Sources (internal knowledge base):**";
const GENERAL_KNOWLEDGE_HEADER: &str = "**Sources (general knowledge):**";
const GENERAL_KNOWLEDGE_NOTE: &str = "**Note:** This response is based on general medical \
knowledge, not our internal knowledge base. For official NHS guidance, please visit NHS.uk \
or consult your healthcare provider.";

const SOURCES_LABEL: &str = "sources:";
const MAX_LINK_TEXT: usize = 60;
const TOPIC_SEPARATORS: [char; 3] = ['-', '\u{2013}', '\u{2014}'];

/// A publisher the model commonly cites, and how to link to a topic page.
struct Publisher {
    /// Lowercase substrings identifying the publisher in an entry.
    needles: &'static [&'static str],
    home: &'static str,
    /// `(prefix, suffix)` around the topic slug. `None` links to `home` only.
    topic_page: Option<(&'static str, &'static str)>,
    word_separator: &'static str,
}

const PUBLISHERS: &[Publisher] = &[
    Publisher {
        needles: &["nhs.uk"],
        home: "https://www.nhs.uk/",
        topic_page: Some(("https://www.nhs.uk/conditions/", "/")),
        word_separator: "-",
    },
    Publisher {
        needles: &["mayo clinic"],
        home: "https://www.mayoclinic.org/",
        topic_page: Some((
            "https://www.mayoclinic.org/diseases-conditions/",
            "/symptoms-causes",
        )),
        word_separator: "-",
    },
    Publisher {
        needles: &["cdc"],
        home: "https://www.cdc.gov/",
        topic_page: None,
        word_separator: "-",
    },
    Publisher {
        needles: &["webmd"],
        home: "https://www.webmd.com/",
        topic_page: Some(("https://www.webmd.com/a-to-z-guides/", "")),
        word_separator: "-",
    },
    Publisher {
        needles: &["medlineplus"],
        home: "https://medlineplus.gov/",
        topic_page: Some(("https://medlineplus.gov/", ".html")),
        word_separator: "",
    },
    Publisher {
        needles: &["cancer research", "cancerresearchuk"],
        home: "https://www.cancerresearchuk.org/",
        topic_page: Some(("https://www.cancerresearchuk.org/about-cancer/", "")),
        word_separator: "-",
    },
];

/// Final text, sources, and attribution of an answer.
#[derive(Debug, Clone, PartialEq)]
pub struct FormattedAnswer {
    pub text: String,
    pub sources: Vec<String>,
    pub attribution: Attribution,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SourceFormatter;

impl SourceFormatter {
    pub fn new() -> Self {
        Self
    }

    pub fn format(
        &self,
        response: &str,
        sources: &[String],
        metadata: &AnswerMetadata,
    ) -> FormattedAnswer {
        if !metadata.is_medical {
            return FormattedAnswer {
                text: response.to_string(),
                sources: sources.to_vec(),
                attribution: Attribution::None,
            };
        }

        if metadata.used_evidence && !sources.is_empty() {
            return knowledge_base_answer(response, sources);
        }

        general_knowledge_answer(response)
    }
}

fn knowledge_base_answer(response: &str, sources: &[String]) -> FormattedAnswer {
    let unique = dedup_preserving_order(sources);

    let mut text = String::with_capacity(response.len() + unique.len() * 80);
    text.push_str(response);
    text.push_str("\n\n");
    text.push_str(KNOWLEDGE_BASE_HEADER);
    text.push('\n');
    for source in &unique {
        if is_http(source) {
            text.push_str(&format!("- [{}]({})\n", link_text(source), source));
        } else {
            text.push_str(&format!("- {source}\n"));
        }
    }

    FormattedAnswer {
        text,
        sources: unique,
        attribution: Attribution::KnowledgeBase,
    }
}

fn general_knowledge_answer(response: &str) -> FormattedAnswer {
    let mut lines: Vec<String> = response.split('\n').map(str::to_string).collect();
    let mut entries: Vec<String> = Vec::new();
    let mut header_index = None;

    for (i, line) in lines.iter_mut().enumerate() {
        let trimmed = line.trim();
        if header_index.is_none() {
            if trimmed.to_lowercase().starts_with(SOURCES_LABEL) {
                header_index = Some(i);
            }
            continue;
        }
        if trimmed.is_empty() {
            continue;
        }
        let Some(entry) = trimmed.strip_prefix('-') else {
            break;
        };
        let entry = entry.trim().to_string();
        if entry.chars().all(|c| c == '-') {
            continue;
        }
        if let Some(link) = link_for_entry(&entry) {
            *line = format!("- {link}");
        }
        entries.push(entry);
    }

    let entries = dedup_preserving_order(&entries);
    debug!(entries = entries.len(), "general knowledge sources extracted");

    let text = match header_index {
        Some(i) if !entries.is_empty() => {
            let rest = lines[i]
                .trim()
                .get(SOURCES_LABEL.len()..)
                .unwrap_or_default()
                .trim()
                .to_string();
            lines[i] = if rest.is_empty() {
                GENERAL_KNOWLEDGE_HEADER.to_string()
            } else {
                format!("{GENERAL_KNOWLEDGE_HEADER} {rest}")
            };
            lines.join("\n")
        }
        _ => format!("{}\n\n\n{GENERAL_KNOWLEDGE_NOTE}", lines.join("\n")),
    };

    FormattedAnswer {
        text,
        sources: entries,
        attribution: Attribution::GeneralKnowledge,
    }
}

/// `[entry](url)` for entries naming a known publisher. Entries that are
/// already links, or name no known publisher, yield `None`.
pub fn link_for_entry(entry: &str) -> Option<String> {
    if entry.starts_with('[') {
        return None;
    }
    let lower = entry.to_lowercase();
    let publisher = PUBLISHERS
        .iter()
        .find(|p| p.needles.iter().any(|n| lower.contains(n)))?;

    let topic = entry
        .split_once(TOPIC_SEPARATORS)
        .map(|(_, topic)| topic.trim())
        .unwrap_or_default();

    let url = match publisher.topic_page {
        Some((prefix, suffix)) if !topic.is_empty() => {
            let slug = slug(topic, publisher.word_separator);
            if slug.is_empty() {
                publisher.home.to_string()
            } else {
                format!("{prefix}{slug}{suffix}")
            }
        }
        _ => publisher.home.to_string(),
    };
    Some(format!("[{entry}]({url})"))
}

fn slug(topic: &str, word_separator: &str) -> String {
    topic
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(word_separator)
        .replace([',', '(', ')'], "")
}

/// Remove duplicates, keeping the first occurrence of each value.
pub fn dedup_preserving_order(values: &[String]) -> Vec<String> {
    let mut unique: Vec<String> = Vec::with_capacity(values.len());
    for value in values {
        if !unique.contains(value) {
            unique.push(value.clone());
        }
    }
    unique
}

fn is_http(value: &str) -> bool {
    value.starts_with("http://") || value.starts_with("https://")
}

/// `host/path` of a URL, shortened to fit a link label.
fn link_text(url: &str) -> String {
    let without_scheme = url.split_once("://").map_or(url, |(_, rest)| rest);
    let end = without_scheme.find(['?', '#']).unwrap_or(without_scheme.len());
    let display = &without_scheme[..end];

    if display.chars().count() > MAX_LINK_TEXT {
        let head: String = display.chars().take(MAX_LINK_TEXT - 3).collect();
        format!("{head}...")
    } else {
        display.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn metadata(is_medical: bool, used_evidence: bool) -> AnswerMetadata {
        AnswerMetadata {
            is_medical,
            used_evidence,
            ..AnswerMetadata::default()
        }
    }

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn dedup_keeps_first_occurrence() {
        assert_eq!(
            dedup_preserving_order(&strings(&["A", "B", "A", "C"])),
            strings(&["A", "B", "C"])
        );
    }

    #[test]
    fn general_answers_pass_through() {
        let sources = strings(&["https://www.nhs.uk/a"]);
        let out = SourceFormatter::new().format("Ha!", &sources, &metadata(false, false));
        assert_eq!(out.text, "Ha!");
        assert_eq!(out.sources, sources);
        assert_eq!(out.attribution, Attribution::None);
    }

    #[test]
    fn knowledge_base_section_lists_unique_links() {
        let sources = strings(&[
            "https://www.nhs.uk/conditions/diabetes/",
            "https://www.nhs.uk/conditions/diabetes/",
            "internal-note",
        ]);
        let out = SourceFormatter::new().format("Answer.", &sources, &metadata(true, true));
        assert_eq!(
            out.text,
            "Answer.\n\n**Sources (internal knowledge base):**\n\
             - [www.nhs.uk/conditions/diabetes/](https://www.nhs.uk/conditions/diabetes/)\n\
             - internal-note\n"
        );
        assert_eq!(out.sources.len(), 2);
        assert_eq!(out.attribution, Attribution::KnowledgeBase);
    }

    #[test]
    fn long_link_text_is_truncated() {
        let url = format!("https://www.cancerresearchuk.org/about-cancer/{}", "a".repeat(40));
        let text = link_text(&url);
        assert_eq!(text.chars().count(), 60);
        assert!(text.ends_with("..."));
        assert!(text.starts_with("www.cancerresearchuk.org/about-cancer/"));
    }

    #[test]
    fn link_text_drops_query_and_fragment() {
        assert_eq!(link_text("https://www.nhs.uk/a/?x=1#top"), "www.nhs.uk/a/");
    }

    #[test]
    fn known_publishers_become_links() {
        assert_eq!(
            link_for_entry("NHS.uk - Leptospirosis").as_deref(),
            Some("[NHS.uk - Leptospirosis](https://www.nhs.uk/conditions/leptospirosis/)")
        );
        assert_eq!(
            link_for_entry("Mayo Clinic \u{2013} High blood pressure (hypertension)").as_deref(),
            Some(
                "[Mayo Clinic \u{2013} High blood pressure (hypertension)](https://www.mayoclinic.org/diseases-conditions/high-blood-pressure-hypertension/symptoms-causes)"
            )
        );
        assert_eq!(
            link_for_entry("MedlinePlus - Heart Failure").as_deref(),
            Some("[MedlinePlus - Heart Failure](https://medlineplus.gov/heartfailure.html)")
        );
        assert_eq!(
            link_for_entry("CDC - Flu").as_deref(),
            Some("[CDC - Flu](https://www.cdc.gov/)")
        );
        assert_eq!(
            link_for_entry("WebMD \u{2014} Migraines, Headaches").as_deref(),
            Some("[WebMD \u{2014} Migraines, Headaches](https://www.webmd.com/a-to-z-guides/migraines-headaches)")
        );
        assert_eq!(
            link_for_entry("Cancer Research UK - Bowel cancer").as_deref(),
            Some("[Cancer Research UK - Bowel cancer](https://www.cancerresearchuk.org/about-cancer/bowel-cancer)")
        );
    }

    #[test]
    fn publisher_without_topic_links_home() {
        assert_eq!(
            link_for_entry("NHS.uk").as_deref(),
            Some("[NHS.uk](https://www.nhs.uk/)")
        );
        assert_eq!(
            link_for_entry("Mayo Clinic -").as_deref(),
            Some("[Mayo Clinic -](https://www.mayoclinic.org/)")
        );
    }

    #[test]
    fn unknown_or_linked_entries_stay_plain() {
        assert_eq!(link_for_entry("WHO - Malaria"), None);
        assert_eq!(link_for_entry("[NHS.uk](https://www.nhs.uk/)"), None);
    }

    #[test]
    fn sources_section_is_rewritten_and_relabelled() {
        let response = "Leptospirosis is a bacterial infection.\n\n\
                        Sources:\n\
                        - NHS.uk - Leptospirosis\n\
                        \n\
                        - WHO - Leptospirosis\n\
                        - NHS.uk - Leptospirosis\n\
                        Stay safe!";
        let out = SourceFormatter::new().format(response, &[], &metadata(true, false));

        assert_eq!(
            out.text,
            "Leptospirosis is a bacterial infection.\n\n\
             **Sources (general knowledge):**\n\
             - [NHS.uk - Leptospirosis](https://www.nhs.uk/conditions/leptospirosis/)\n\
             \n\
             - WHO - Leptospirosis\n\
             - [NHS.uk - Leptospirosis](https://www.nhs.uk/conditions/leptospirosis/)\n\
             Stay safe!"
        );
        assert_eq!(
            out.sources,
            strings(&["NHS.uk - Leptospirosis", "WHO - Leptospirosis"])
        );
        assert_eq!(out.attribution, Attribution::GeneralKnowledge);
    }

    #[test]
    fn header_match_is_case_insensitive() {
        let out = SourceFormatter::new().format(
            "Text\nSOURCES:\n- CDC - Measles",
            &[],
            &metadata(true, false),
        );
        assert!(out.text.contains("**Sources (general knowledge):**\n- [CDC - Measles]"));
    }

    #[test]
    fn bare_dashes_are_not_sources() {
        let out = SourceFormatter::new().format(
            "Answer.\nSources:\n- NHS.uk - Flu\n-\n---\n- ",
            &[],
            &metadata(true, false),
        );
        assert_eq!(out.sources, strings(&["NHS.uk - Flu"]));
    }

    #[test]
    fn dash_only_sources_section_appends_note() {
        let out = SourceFormatter::new().format(
            "Answer.\nSources:\n-\n---",
            &[],
            &metadata(true, false),
        );
        assert!(out.sources.is_empty());
        assert!(out.text.ends_with("consult your healthcare provider."));
    }

    #[test]
    fn missing_sources_section_appends_note() {
        let retrieval_sources = strings(&["https://example.com/a"]);
        let out = SourceFormatter::new().format(
            "Plain answer.",
            &retrieval_sources,
            &metadata(true, false),
        );
        assert!(out.text.starts_with("Plain answer.\n\n\n**Note:**"));
        assert!(out.sources.is_empty());
        assert_eq!(out.attribution, Attribution::GeneralKnowledge);
    }

    #[test]
    fn empty_sources_section_appends_note() {
        let out = SourceFormatter::new().format(
            "Answer.\nSources:\nNone available.",
            &[],
            &metadata(true, false),
        );
        assert!(out.text.contains("Sources:\nNone available."));
        assert!(out.text.ends_with("consult your healthcare provider."));
        assert!(out.sources.is_empty());
    }

    #[test]
    fn evidence_flag_without_sources_falls_back_to_general_knowledge() {
        let out = SourceFormatter::new().format("Answer.", &[], &metadata(true, true));
        assert_eq!(out.attribution, Attribution::GeneralKnowledge);
    }
}
