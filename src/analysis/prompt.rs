use crate::models::CaseData;

pub const SYSTEM_PROMPT: &str = "You are an AI medical assistant helping clinicians analyze patient cases.
Provide evidence-based diagnostic insights, suggest possible conditions, recommend tests, and offer clinical recommendations.
Always include confidence scores and reasoning for your suggestions.
Be clear that you are an AI assistant and final decisions should be made by qualified healthcare professionals.";

const ANALYSIS_INSTRUCTIONS: &str = "Please analyze this case and provide:
1. Possible diagnoses with confidence scores and reasoning
2. Suggested diagnostic tests
3. Clinical recommendations";

/// Case context for the user prompt. Images contribute a count only.
pub fn build_context(case: Option<&CaseData>) -> String {
    let mut context = String::new();
    let Some(case) = case else {
        return context;
    };

    if let Some(notes) = case.notes() {
        context.push_str("Clinical Notes: ");
        context.push_str(notes);
        context.push_str("\n\n");
    }

    let images = case.image_count();
    if images > 0 {
        context.push_str(&format!("Medical images uploaded: {images} image(s)\n\n"));
    }

    context
}

pub fn build_user_prompt(context: &str, query: &str) -> String {
    format!("{context}Query: {query}\n\n{ANALYSIS_INSTRUCTIONS}")
}
