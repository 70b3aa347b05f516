// Shared prompt constants and prompt-building utilities.
// Each flow defines its own template in flows/prompts.rs.
// This file contains cross-cutting prompt fragments.

/// System prompt that enforces JSON-only output for every flow.
pub const JSON_ONLY_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Instruction appended to every college-producing prompt.
pub const GOVERNMENT_ONLY_INSTRUCTION: &str = "\
    CRITICAL: Verify that each college is a government-funded and operated institution \
    located within India. Do NOT include any private universities, foreign universities, \
    or any institution that is not a government college in India. There are no exceptions.";

/// Maps the student's education level onto the programme tier to recommend.
pub const EDUCATION_TIER_INSTRUCTION: &str = "\
    If the education level is 'Completed Class 12' or similar, focus on UNDERGRADUATE \
    programs and exams (e.g. B.Tech, B.Sc., JEE, NEET). \
    If the education level is 'Undergraduate', focus on POSTGRADUATE programs and exams \
    (e.g. M.Tech, M.Sc., MBA, GATE, CAT).";

/// Renders a list as `- item` lines for interpolation into a template.
pub fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Replaces every `{key}` placeholder in `template` with its value.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |acc, (key, value)| {
        acc.replace(&format!("{{{key}}}"), value)
    })
}
