//! Text and JSON rendering for CLI results.

use anyhow::Result;
use novaboard_core::{DashboardStats, Project, ProjectStatus, TimelineLayout};
use serde_json::json;

pub struct Output {
    json: bool,
}

impl Output {
    pub fn new(json: bool) -> Self {
        Self { json }
    }

    fn emit_json(&self, value: &serde_json::Value) -> Result<()> {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }

    pub fn message(&self, text: &str) -> Result<()> {
        if self.json {
            return self.emit_json(&json!({ "message": text }));
        }
        println!("{text}");
        Ok(())
    }

    pub fn created(&self, kind: &str, id: &str) -> Result<()> {
        if self.json {
            return self.emit_json(&json!({ "created": kind, "id": id }));
        }
        println!("created {kind} {id}");
        Ok(())
    }

    pub fn markdown(&self, text: &str) -> Result<()> {
        if self.json {
            return self.emit_json(&json!({ "summary": text }));
        }
        println!("{text}");
        Ok(())
    }

    pub fn project_list(&self, projects: &[&Project]) -> Result<()> {
        if self.json {
            return self.emit_json(&serde_json::to_value(projects)?);
        }
        if projects.is_empty() {
            println!("no projects match");
            return Ok(());
        }
        for project in projects {
            println!("{}", project_line(project));
        }
        Ok(())
    }

    pub fn board(&self, columns: &[(ProjectStatus, Vec<&Project>)]) -> Result<()> {
        if self.json {
            let value: serde_json::Map<String, serde_json::Value> = columns
                .iter()
                .map(|(status, projects)| {
                    Ok((status.as_str().to_string(), serde_json::to_value(projects)?))
                })
                .collect::<Result<_>>()?;
            return self.emit_json(&serde_json::Value::Object(value));
        }
        for (status, projects) in columns {
            println!("== {status} ({}) ==", projects.len());
            for project in projects {
                println!("  {}", project_line(project));
            }
        }
        Ok(())
    }

    pub fn project_detail(&self, project: &Project) -> Result<()> {
        if self.json {
            return self.emit_json(&serde_json::to_value(project)?);
        }
        println!("{} {}", project.id, project.name);
        println!("  status:   {}", project.status);
        println!("  priority: {}", project.priority);
        println!("  owner:    {}", project.owner);
        println!("  budget:   {}", project.budget);
        println!("  dates:    {} .. {}", project.start_date, project.due_date);
        if !project.description.is_empty() {
            println!("  {}", project.description);
        }
        let (done, total) = project.subtask_progress();
        if total > 0 {
            println!("subtasks {done}/{total}:");
            for subtask in &project.subtasks {
                let mark = if subtask.is_completed { "x" } else { " " };
                println!("  [{mark}] {} ({})", subtask.title, subtask.id);
            }
        }
        if !project.comments.is_empty() {
            println!("comments:");
            for comment in &project.comments {
                println!("  {} {}: {}", comment.timestamp, comment.author, comment.text);
            }
        }
        Ok(())
    }

    pub fn timeline(&self, layout: &TimelineLayout<'_>) -> Result<()> {
        if self.json {
            return self.emit_json(&serde_json::to_value(layout)?);
        }
        println!(
            "{} zoom: {} .. {} ({} days, {} px)",
            layout.zoom.label(),
            layout.span_start,
            layout.span_end,
            layout.total_days,
            layout.total_width
        );
        let tier = |headers: &[novaboard_core::timeline::Bucket]| {
            headers
                .iter()
                .map(|bucket| bucket.label.as_str())
                .collect::<Vec<_>>()
                .join(" | ")
        };
        println!("  {}", tier(&layout.primary_headers));
        println!("  {}", tier(&layout.secondary_headers));
        if layout.today_visible() {
            println!("  today at {} px", layout.today_offset);
        }
        for bar in &layout.bars {
            println!(
                "  {:<32} {} .. {}  left={} width={} days={}",
                bar.project.name, bar.starts_on, bar.ends_on, bar.left, bar.width, bar.duration_days
            );
        }
        Ok(())
    }

    pub fn stats(
        &self,
        stats: &DashboardStats,
        risks: &[&Project],
        top_budgets: &[&Project],
    ) -> Result<()> {
        if self.json {
            return self.emit_json(&json!({
                "stats": stats,
                "riskRadar": risks,
                "topBudgets": top_budgets,
            }));
        }
        println!("projects:   {}", stats.total_projects);
        println!("budget:     {}", stats.total_budget);
        println!("active:     {}", stats.active_projects);
        println!("critical:   {}", stats.critical_projects);
        println!(
            "completed:  {} ({}%)",
            stats.completed_projects, stats.completion_rate
        );
        println!("risk radar:");
        for project in risks {
            println!("  {}", project_line(project));
        }
        println!("top budgets:");
        for project in top_budgets {
            println!("  {:>12}  {}", project.budget, project.name);
        }
        Ok(())
    }
}

fn project_line(project: &Project) -> String {
    format!(
        "{:<10} {:<32} {:<12} {:<9} {:<16} due {}",
        project.id,
        project.name,
        project.status.as_str(),
        project.priority.as_str(),
        project.owner,
        project.due_date
    )
}
