use comfy_table::{Attribute, Cell, Color, Row, Table};
use daily3_core::models::{Category, Note, Task, TaskDraft};

use crate::util::short_id;

/// The bands the vault groups scores into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeverageBand {
    Low,
    Decent,
    High,
    Ultra,
}

impl LeverageBand {
    pub fn from_score(score: f64) -> Self {
        if score >= 20.0 {
            LeverageBand::Ultra
        } else if score >= 5.0 {
            LeverageBand::High
        } else if score >= 1.0 {
            LeverageBand::Decent
        } else {
            LeverageBand::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            LeverageBand::Low => "Low",
            LeverageBand::Decent => "Decent",
            LeverageBand::High => "High Value",
            LeverageBand::Ultra => "Ultra High",
        }
    }

    fn color(self) -> Color {
        match self {
            LeverageBand::Low => Color::DarkGrey,
            LeverageBand::Decent => Color::Blue,
            LeverageBand::High => Color::Yellow,
            LeverageBand::Ultra => Color::Green,
        }
    }
}

fn score_cell(score: f64) -> Cell {
    let band = LeverageBand::from_score(score);
    Cell::new(format!("{score:.2} {}", band.label())).fg(band.color())
}

pub fn display_vault(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("The vault is empty.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec!["ID", "Title", "Category", "Leverage", "Flags"]);

    for task in tasks {
        let mut row = Row::new();
        row.add_cell(Cell::new(short_id(&task.id)));

        let mut title_cell = Cell::new(&task.title);
        if task.completed {
            title_cell = title_cell
                .add_attribute(Attribute::CrossedOut)
                .fg(Color::DarkGrey);
        } else if task.is_daily3 {
            title_cell = title_cell.add_attribute(Attribute::Bold);
        }
        row.add_cell(title_cell);

        row.add_cell(Cell::new(&task.category));
        row.add_cell(score_cell(task.calculated_score));
        row.add_cell(Cell::new(flags(task)));
        table.add_row(row);
    }

    println!("{table}");
}

fn flags(task: &Task) -> String {
    let mut out = String::new();
    if task.is_daily3 {
        out.push_str("focus ");
    }
    if task.is_recurring {
        out.push_str("↻ ");
    }
    if task.is_reusable {
        out.push_str("reusable ");
    }
    if task.is_after_hours {
        out.push_str("after-hours ");
    }
    out.trim_end().to_string()
}

pub fn display_focus(tasks: &[Task]) {
    if tasks.is_empty() {
        println!("No focus tasks yet. Promote up to 3 with `daily3 focus push <id>`.");
        return;
    }

    let mut table = Table::new();
    table.set_header(vec![
        "Slot",
        "ID",
        "Title",
        "Category",
        "Leverage",
        "Magic Words",
    ]);

    for (slot, task) in tasks.iter().enumerate() {
        let mut row = Row::new();
        row.add_cell(Cell::new(slot + 1));
        row.add_cell(Cell::new(short_id(&task.id)));
        row.add_cell(Cell::new(&task.title).add_attribute(Attribute::Bold));
        row.add_cell(Cell::new(&task.category));
        row.add_cell(score_cell(task.calculated_score));
        row.add_cell(Cell::new(&task.magic_words));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_drafts(drafts: &[TaskDraft]) {
    let mut table = Table::new();
    table.set_header(vec!["#", "Title", "Category", "Score", "Magic Words"]);

    for (i, draft) in drafts.iter().enumerate() {
        let mut row = Row::new();
        row.add_cell(Cell::new(i + 1));
        row.add_cell(Cell::new(&draft.title));
        row.add_cell(Cell::new(&draft.category));
        row.add_cell(score_cell(draft.hormozi_score));
        row.add_cell(Cell::new(&draft.magic_words));
        table.add_row(row);
    }

    println!("{table}");
}

pub fn display_categories(categories: &[Category]) {
    if categories.is_empty() {
        println!("No categories found.");
        return;
    }
    for category in categories {
        println!("{}", category.name);
    }
}

pub fn display_notes(notes: &[Note]) {
    if notes.is_empty() {
        println!("No notes logged for this task.");
        return;
    }
    for note in notes {
        println!(
            "{}  {}",
            note.created_at.format("%Y-%m-%d %H:%M"),
            note.content
        );
    }
}
