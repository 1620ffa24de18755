use std::collections::BTreeMap;

use crate::charts::ChartBundle;
use crate::model::{Analysis, AnalysisResponse, GenaiStatus, PlanDay, Resource, Summary};

const DEFAULT_ACTIVITY: &str = "<li>Review key concepts and solve practice questions</li>";

/// Everything the dashboard page template needs, already rendered to
/// strings. Backend-supplied text is HTML-escaped here, once.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub total_attempts: String,
    pub overall_accuracy: String,
    pub strength_level: String,
    pub summary_details: String,
    pub subtopic_ranking: String,
    pub revision_summary: String,
    pub study_plan: String,
    pub recommendations: String,
    pub study_tips: String,
    pub genai_title: String,
    pub genai_message: String,
    pub charts_json: String,
}

impl DashboardView {
    pub fn build(response: &AnalysisResponse) -> Self {
        let analysis = &response.analysis;
        let summary = &analysis.summary;
        let bundle = ChartBundle::build(analysis);
        let (genai_title, genai_message) = genai_banner(response.genai_status.as_ref());

        Self {
            total_attempts: summary.total_attempts.to_string(),
            overall_accuracy: format!("{:.1}%", summary.overall_accuracy),
            strength_level: escape_html(&summary.strength_level),
            summary_details: summary_details(summary),
            subtopic_ranking: subtopic_ranking(analysis),
            revision_summary: revision_summary(response.revision_summary.as_deref(), analysis),
            study_plan: study_plan(&response.plan),
            recommendations: recommendations(&response.recommendations),
            study_tips: study_tips(&response.study_tips),
            genai_title,
            genai_message,
            charts_json: serde_json::to_string(&bundle).unwrap_or_else(|_| "{}".to_string()),
        }
    }
}

pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn stat_row(label: &str, value: &str) -> String {
    format!(
        r#"<div class="stat-row"><span class="stat-label">{label}</span><span class="stat-value">{value}</span></div>"#
    )
}

fn summary_details(summary: &Summary) -> String {
    let mut card = String::from(r#"<div class="subject-stat"><h4>Summary</h4>"#);
    card.push_str(&stat_row(
        "Total Attempts",
        &summary.total_attempts.to_string(),
    ));
    card.push_str(&stat_row(
        "Overall Accuracy",
        &format!("{:.1}%", summary.overall_accuracy),
    ));
    card.push_str(&stat_row(
        "Avg Time (Correct)",
        &format!("{:.1}s", summary.avg_time_correct),
    ));
    card.push_str(&stat_row(
        "Avg Time (Incorrect)",
        &format!("{:.1}s", summary.avg_time_incorrect),
    ));
    card.push_str("</div>");
    card
}

fn subtopic_ranking(analysis: &Analysis) -> String {
    let mut html = String::new();
    for item in &analysis.subtopic_ranking {
        html.push_str(&format!(
            r#"<div class="subject-stat"><h4>{}</h4>"#,
            escape_html(&item.subtopic)
        ));
        html.push_str(&stat_row("Topic", &escape_html(&item.topic)));
        html.push_str(&stat_row("Accuracy", &format!("{:.1}%", item.accuracy)));
        html.push_str(&stat_row("Attempts", &item.attempts.to_string()));
        if let Some(rank) = item.rank {
            html.push_str(&stat_row("Rank", &rank.to_string()));
        }
        html.push_str("</div>");
    }
    html
}

/// Backend-written summary when present, otherwise a sentence built from
/// the overall accuracy and the top high-weightage subtopics.
fn revision_summary(custom: Option<&str>, analysis: &Analysis) -> String {
    if let Some(text) = custom {
        if !text.trim().is_empty() {
            return escape_html(text);
        }
    }

    let high: Vec<String> = analysis
        .subtopic_ranking
        .iter()
        .filter(|item| item.topic_weightage == "high")
        .take(2)
        .map(|item| escape_html(&item.subtopic))
        .collect();
    let especially = if high.is_empty() {
        String::new()
    } else {
        format!(", especially {}", high.join(", "))
    };

    format!(
        "This test shows {:.1}% overall accuracy. Prioritize high-weightage weak chapters first{}, \
         then revise remaining weak areas with timed practice and error correction to improve marks.",
        analysis.summary.overall_accuracy, especially
    )
}

fn study_plan(plan: &[PlanDay]) -> String {
    if plan.is_empty() {
        return "<p>No study plan available.</p>".to_string();
    }

    let mut html = String::new();
    for day in plan {
        let focus_items: Vec<String> = day.focus.items().iter().map(|f| escape_html(f)).collect();
        let focus_text = if focus_items.is_empty() {
            "Revision".to_string()
        } else {
            focus_items.join(", ")
        };
        let date = day
            .date
            .as_deref()
            .filter(|d| !d.is_empty())
            .map(escape_html)
            .unwrap_or_else(|| "-".to_string());
        let study_time = day
            .study_time
            .as_deref()
            .filter(|t| !t.is_empty())
            .map(escape_html)
            .unwrap_or_else(|| "2-3 hours".to_string());
        let activities = if day.activities.is_empty() {
            DEFAULT_ACTIVITY.to_string()
        } else {
            list_items(&day.activities)
        };

        html.push_str(&format!(
            r#"<div class="day-plan"><h4>Day {}</h4><div class="day-date">{date}</div>"#,
            escape_html(&day.day.to_string())
        ));
        html.push_str(&format!(
            r#"<div class="day-focus"><strong>Focus:</strong> {focus_text}</div>"#
        ));
        html.push_str(&format!(
            r#"<div><strong style="display: block; margin-bottom: 0.5rem;">Study Time: {study_time}</strong>"#
        ));
        html.push_str(
            r#"<strong style="display: block; margin-bottom: 0.5rem;">Activities:</strong>"#,
        );
        html.push_str(&format!(
            r#"<ul class="activities-list">{activities}</ul></div></div>"#
        ));
    }
    html
}

fn list_items(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("<li>{}</li>", escape_html(item)))
        .collect()
}

fn recommendations(recommendations: &BTreeMap<String, Vec<Resource>>) -> String {
    if recommendations.is_empty() {
        return "<p>No recommendations available.</p>".to_string();
    }

    let mut html = String::new();
    for (subject, resources) in recommendations {
        html.push_str(&format!(
            r#"<div class="subject-recommendations"><h4>📚 {}</h4>"#,
            escape_html(subject)
        ));
        for resource in resources {
            let url = escape_html(&resource.url);
            html.push_str(&format!(
                r#"<div class="resource"><div class="resource-name">{}</div><span class="resource-type">{}</span><br><a href="{url}" target="_blank" class="resource-link">{url}</a></div>"#,
                escape_html(&resource.name),
                escape_html(&resource.kind),
            ));
        }
        html.push_str("</div>");
    }
    html
}

fn study_tips(tips: &BTreeMap<String, Vec<String>>) -> String {
    if tips.is_empty() {
        return "<p>No study tips available.</p>".to_string();
    }

    let mut html = String::new();
    for (subject, subject_tips) in tips {
        html.push_str(&format!(
            r#"<div class="tips-card"><h4>💡 {}</h4><ul>{}</ul></div>"#,
            escape_html(subject),
            list_items(subject_tips),
        ));
    }
    html
}

fn genai_banner(status: Option<&GenaiStatus>) -> (String, String) {
    let Some(status) = status else {
        return (
            "⚠ Status unavailable".to_string(),
            "No GenAI status returned by backend.".to_string(),
        );
    };

    let title = if status.used {
        "✅ GenAI started and applied"
    } else {
        "⚙️ Rule-based mode"
    };
    let message = status
        .message
        .as_deref()
        .filter(|m| !m.is_empty())
        .map(escape_html)
        .unwrap_or_else(|| {
            if status.used {
                "GenAI outputs applied.".to_string()
            } else {
                "Using dynamic fallback logic.".to_string()
            }
        });
    (title.to_string(), message)
}
