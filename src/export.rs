use crate::model::PlanDay;

pub const PLAN_FILENAME: &str = "study-plan.txt";

/// Plain-text rendition of the study plan, as offered for download.
pub fn plan_text(plan: &[PlanDay]) -> String {
    let mut text = String::from("Student Performance Analysis - 7-Day Study Plan\n");
    text.push_str(&"=".repeat(50));
    text.push_str("\n\n");

    for day in plan {
        let date = day.date.as_deref().filter(|d| !d.is_empty()).unwrap_or("-");
        let study_time = day
            .study_time
            .as_deref()
            .filter(|t| !t.is_empty())
            .unwrap_or("2-3 hours");

        text.push_str(&format!("Day {} - {date}\n", day.day));
        text.push_str(&"-".repeat(30));
        text.push('\n');
        text.push_str(&format!("Focus: {}\n", day.focus.items().join(", ")));
        text.push_str(&format!("Study Time: {study_time}\n"));
        text.push_str("\nActivities:\n");
        for activity in &day.activities {
            text.push_str(&format!("  • {activity}\n"));
        }
        text.push_str("\nGoals:\n");
        for goal in &day.goals {
            text.push_str(&format!("  • {goal}\n"));
        }
        text.push('\n');
    }

    text
}
