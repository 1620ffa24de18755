use serde::Serialize;

use crate::model::{Analysis, DifficultyAccuracy, ProgressionPoint, TimeComparison};

pub const RED: &str = "#e74c3c";
pub const AMBER: &str = "#f39c12";
pub const GREEN: &str = "#2ecc71";
pub const BLUE: &str = "#3498db";
pub const BLUE_FILL: &str = "rgba(52, 152, 219, 0.1)";
pub const WHITE: &str = "#fff";

/// Traffic-light colour for an accuracy percentage.
pub fn accuracy_color(score: f64) -> &'static str {
    if score < 50.0 {
        RED
    } else if score < 70.0 {
        AMBER
    } else {
        GREEN
    }
}

/// One Chart.js `new Chart(ctx, {...})` argument, built server side and
/// embedded in the dashboard page as JSON.
#[derive(Debug, Serialize, Clone)]
pub struct ChartConfig {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: ChartData,
    pub options: ChartOptions,
}

#[derive(Debug, Serialize, Clone)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

#[derive(Debug, Serialize, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct Dataset {
    pub label: &'static str,
    pub data: Vec<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background_color: Option<ColorSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_color: Option<ColorSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub border_radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fill: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tension: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_radius: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_background_color: Option<ColorSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_border_color: Option<ColorSpec>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub point_border_width: Option<u32>,
}

/// Bar charts colour each bar, line charts use a single colour.
#[derive(Debug, Serialize, Clone)]
#[serde(untagged)]
pub enum ColorSpec {
    One(&'static str),
    Many(Vec<&'static str>),
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ChartOptions {
    pub responsive: bool,
    pub maintain_aspect_ratio: bool,
    pub plugins: Plugins,
    pub scales: Scales,
}

#[derive(Debug, Serialize, Clone)]
pub struct Plugins {
    pub legend: Legend,
}

#[derive(Debug, Serialize, Clone)]
pub struct Legend {
    pub display: bool,
}

#[derive(Debug, Serialize, Clone)]
pub struct Scales {
    pub y: Axis,
}

#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Axis {
    pub begin_at_zero: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ticks: Option<Ticks>,
}

/// Unit appended to tick labels by the page script. Chart.js itself wants
/// a callback function there, which JSON cannot carry.
#[derive(Debug, Serialize, Clone)]
pub struct Ticks {
    pub suffix: &'static str,
}

/// The three dashboard charts as one embeddable blob.
#[derive(Debug, Serialize, Clone)]
pub struct ChartBundle {
    pub accuracy: ChartConfig,
    pub time: ChartConfig,
    pub strength: ChartConfig,
}

impl ChartBundle {
    pub fn build(analysis: &Analysis) -> Self {
        Self {
            accuracy: accuracy_chart(&analysis.accuracy_by_difficulty),
            time: time_chart(&analysis.time_comparison),
            strength: strength_chart(&analysis.strength_progression),
        }
    }
}

fn options(max: Option<u32>, ticks: Option<Ticks>) -> ChartOptions {
    ChartOptions {
        responsive: true,
        maintain_aspect_ratio: true,
        plugins: Plugins {
            legend: Legend { display: true },
        },
        scales: Scales {
            y: Axis {
                begin_at_zero: true,
                max,
                ticks,
            },
        },
    }
}

fn accuracy_chart(rows: &[DifficultyAccuracy]) -> ChartConfig {
    let labels = rows
        .iter()
        .map(|row| format!("Difficulty {}", row.difficulty))
        .collect();
    let data: Vec<f64> = rows.iter().map(|row| row.accuracy).collect();
    let colors: Vec<&'static str> = data.iter().map(|score| accuracy_color(*score)).collect();

    ChartConfig {
        kind: "bar",
        data: ChartData {
            labels,
            datasets: vec![Dataset {
                label: "Accuracy (%)",
                data,
                background_color: Some(ColorSpec::Many(colors.clone())),
                border_color: Some(ColorSpec::Many(colors)),
                border_width: Some(1),
                border_radius: Some(4),
                ..Dataset::default()
            }],
        },
        options: options(Some(100), Some(Ticks { suffix: "%" })),
    }
}

fn time_chart(times: &TimeComparison) -> ChartConfig {
    ChartConfig {
        kind: "bar",
        data: ChartData {
            labels: vec!["Correct".to_string(), "Incorrect".to_string()],
            datasets: vec![Dataset {
                label: "Average Time (seconds)",
                data: vec![times.avg_time_correct, times.avg_time_incorrect],
                background_color: Some(ColorSpec::Many(vec![GREEN, RED])),
                border_color: Some(ColorSpec::Many(vec![GREEN, RED])),
                border_width: Some(1),
                border_radius: Some(4),
                ..Dataset::default()
            }],
        },
        options: options(None, None),
    }
}

fn strength_chart(points: &[ProgressionPoint]) -> ChartConfig {
    let labels = points.iter().map(|p| p.test_id.to_string()).collect();
    let data = points.iter().map(|p| p.strength_score).collect();

    ChartConfig {
        kind: "line",
        data: ChartData {
            labels,
            datasets: vec![Dataset {
                label: "Strength Score",
                data,
                border_color: Some(ColorSpec::One(BLUE)),
                background_color: Some(ColorSpec::One(BLUE_FILL)),
                fill: Some(true),
                tension: Some(0.4),
                point_radius: Some(6),
                point_background_color: Some(ColorSpec::One(BLUE)),
                point_border_color: Some(ColorSpec::One(WHITE)),
                point_border_width: Some(2),
                ..Dataset::default()
            }],
        },
        options: options(Some(100), None),
    }
}
