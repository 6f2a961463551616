//! Prompt templates for the draft generator.
//!
//! All array-producing prompts share the same contract: persona framing,
//! explicit categorization rules, and a hard "JSON array ONLY" output
//! directive. The model is still free to ignore it, which is why the
//! response path bracket-scans instead of trusting the output shape.

/// Breaks a goal into draft tasks for the strategic intake flow.
pub fn strategic_intake(categories: &[String], goal: &str) -> String {
    format!(
        r#"Break the following goal into a concise list of actionable tasks.
Persona: Strategist focused on leverage and execution speed.
Format: JSON array ONLY. No markdown. No preamble.

Fields:
- title: Punchy action
- category: One of [{categories}]
- hormoziScore: Leverage number 1-10
- magicWords: Execution script

Goal: "{goal}"
"#,
        categories = categories.join(", "),
        goal = goal
    )
}

/// Triages a free-form brain dump into draft tasks.
pub fn brain_dump_triage(categories: &[String], text: &str) -> String {
    format!(
        r#"Persona: Productivity Architect focused on leverage.
Task: Parse the "Brain Dump" into actionable tasks. Split multi-part thoughts.

Categorization Logic (CRITICAL):
1. Existing Categories: [{categories}]. Try to fit tasks here first.
2. Match on topic keywords: revenue, quoting and sales work belongs in an
   income category; planning and positioning work belongs in a strategy
   category.
3. Only suggest a new category if a task absolutely does not fit an
   existing one.

Return JSON array ONLY. Be extremely concise.
Format: {{ "title": string, "category": string, "hormoziScore": number(1-10), "magicWords": string }}[]

Input: "{text}"
"#,
        categories = categories.join(", "),
        text = text
    )
}

/// Single free-text coaching nudge built from today's activity log.
/// Plain text in, plain text out; nothing here is parsed.
pub fn state_disruptor(logs: &[String]) -> String {
    let mission_data = if logs.is_empty() {
        "No logs yet.".to_string()
    } else {
        logs.join(", ")
    };
    format!(
        r#"Persona: Precision coaching practitioner.
Goal: Disrupt the user's current stale state and challenge their mental map of the day.

Constraints:
- Do NOT use generic insults.
- ASK specific, piercing coaching questions.
- Focus on outcomes and sensory-based evidence (How will you know you're succeeding?).
- Use high-impact language to shift them into execution.

Current Mission Data: {mission_data}

Instructions:
1. If logs are empty, ask what is SPECIFICALLY stopping them from starting the first income-generating task.
2. If logs exist, ask how it would feel to see that log update again in 10 minutes.
3. Reference their categories if visible in the log entries.

Format: A single, punchy paragraph (max 3 sentences).
"#
    )
}
