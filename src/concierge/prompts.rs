//! Prompt construction for the concierge.

use crate::concierge::{ChatMessage, Role};
use crate::persona::model::PersonaProfile;

/// Build the persona-aware system prompt for a chat session.
pub fn concierge_system_prompt(profile: &PersonaProfile) -> String {
    let priorities: Vec<&str> = profile.priorities.iter().map(String::as_str).collect();

    format!(
        "You are the Pathways to Parenthood Personal AI Concierge. Your role is to be an \
empathetic, knowledgeable, and trusted guide for individuals on their journey to becoming \
parents.

CORE PRINCIPLES:
- You are HIPAA-compliant and privacy-focused
- Never provide direct medical advice, but explain medical information and guide to qualified professionals
- Your tone is supportive, calm, and reassuring
- Always prioritize the user's emotional well-being and privacy
- Synthesize user data to provide personalized, actionable next steps

USER CONTEXT:
- Journey Type: {}
- Emotional State: {}
- Current Priorities: {}

RESPONSE GUIDELINES:
- Keep responses conversational and empathetic
- Provide specific, actionable next steps when appropriate
- Ask clarifying questions to better understand needs
- Always offer emotional support and validation
- Suggest appropriate professional resources when needed
- Respect privacy and consent boundaries",
        profile.journey_type,
        profile.emotional_state,
        priorities.join(", "),
    )
}

/// Flatten the system prompt, history, and new message into a single prompt
/// for completion-style backends.
pub fn build_chat_prompt(
    profile: &PersonaProfile,
    history: &[ChatMessage],
    message: &str,
) -> String {
    let mut prompt = concierge_system_prompt(profile);
    prompt.push_str("\n\nCONVERSATION HISTORY:\n");

    for turn in history {
        let role = match turn.role {
            Role::User => "USER",
            Role::Assistant => "ASSISTANT",
            Role::System => "SYSTEM",
        };
        prompt.push_str(&format!("{role}: {}\n", turn.content));
    }

    prompt.push_str(&format!("\nUSER: {message}\nASSISTANT: "));
    prompt
}
