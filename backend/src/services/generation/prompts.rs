//! Prompt templates for sentence generation
//!
//! Two templates are chosen based on whether the user already spoke:
//! opening mode produces sentences that *initiate* interaction in the
//! resolved category, continuation mode produces natural follow-ups to the
//! prior exchange. Both end with the same output contract: a JSON object
//! with the single key `generated_sentences` holding an array of strings.

use crate::models::ConversationTurn;

/// The sole key the model is asked to emit; the response parser recognizes
/// nothing else.
pub const GENERATED_SENTENCES_KEY: &str = "generated_sentences";

const OUTPUT_CONTRACT: &str = r#"
[Output format]
Your answer MUST be a JSON object with exactly one key, "generated_sentences",
whose value is an array of 4 to 5 strings - the generated sentences, nothing else."#;

/// Everything the prompt builder may draw on for one generation call
pub struct PromptContext<'a> {
    pub category: &'a str,
    pub keywords: Option<&'a str>,
    pub situation: Option<&'a str>,
    pub previous_sentence: Option<&'a str>,
    pub opponent_dialogue: Option<&'a str>,
    pub conversation: &'a [ConversationTurn],
    pub favorites: &'a [String],
}

/// Build the full instruction for one generation call, picking the mode
/// from the presence of a previous sentence.
pub fn build_prompt(ctx: &PromptContext<'_>) -> String {
    match ctx.previous_sentence.filter(|s| !s.trim().is_empty()) {
        Some(previous) => continuation_prompt(ctx, previous),
        None => opening_prompt(ctx),
    }
}

fn opening_prompt(ctx: &PromptContext<'_>) -> String {
    let mut prompt = format!(
        "You are a sentence-generation expert for an AAC (augmentative and \
         alternative communication) app, helping a user who has difficulty speaking.\n\
         Generate polite, concise sentences the user would say to START an \
         interaction in the situation below. Always speak from the user's point \
         of view (the customer, the patient) - never as the staff or service provider.\n\n\
         [User situation]\n\
         - Current place: {}\n\
         - Keywords entered by the user: {}\n",
        ctx.category,
        ctx.keywords.filter(|k| !k.trim().is_empty()).unwrap_or("none"),
    );

    push_rich_context(&mut prompt, ctx);

    prompt.push_str(
        "\n[Generation rules]\n\
         1. If keywords are given, every sentence must make use of them.\n\
         2. Keep sentences short enough to be spoken in one breath.\n",
    );
    push_priority_rules(&mut prompt, ctx);
    prompt.push_str(OUTPUT_CONTRACT);
    prompt
}

fn continuation_prompt(ctx: &PromptContext<'_>, previous: &str) -> String {
    let mut prompt = format!(
        "You are a sentence-generation expert for an AAC (augmentative and \
         alternative communication) app, helping a user who has difficulty speaking.\n\
         The user is in the middle of a conversation. Generate the most natural \
         next sentences from the user's point of view, continuing the exchange below.\n\n\
         [User situation]\n\
         - Current place: {}\n\
         - What the user just said: \"{}\"\n\
         - What the other person replied: {}\n\
         - Keywords for what the user wants to say next: {}\n",
        ctx.category,
        previous,
        ctx.opponent_dialogue
            .filter(|s| !s.trim().is_empty())
            .map(|s| format!("\"{}\"", s))
            .unwrap_or_else(|| "(no reply yet)".to_string()),
        ctx.keywords.filter(|k| !k.trim().is_empty()).unwrap_or("none"),
    );

    push_rich_context(&mut prompt, ctx);

    prompt.push_str(
        "\n[Generation rules]\n\
         1. The sentences must follow naturally from the exchange above.\n\
         2. Incorporate the other person's last line when responding to it.\n",
    );
    push_priority_rules(&mut prompt, ctx);
    prompt.push_str(OUTPUT_CONTRACT);
    prompt
}

/// Situation description, conversation history and favorites sections,
/// added only when present
fn push_rich_context(prompt: &mut String, ctx: &PromptContext<'_>) {
    if let Some(situation) = ctx.situation.filter(|s| !s.trim().is_empty()) {
        prompt.push_str(&format!(
            "- The user's own description of the situation: \"{}\"\n",
            situation
        ));
    }

    if !ctx.conversation.is_empty() {
        prompt.push_str("\n[Recent conversation]\n");
        for turn in ctx.conversation {
            prompt.push_str(&format!("- {}: {}\n", turn.speaker, turn.message));
        }
    }

    if !ctx.favorites.is_empty() {
        prompt.push_str(&format!(
            "\n[Favorited sentences - a hint for the user's usual way of speaking]\n{}\n",
            ctx.favorites.join(", ")
        ));
    }
}

fn push_priority_rules(prompt: &mut String, ctx: &PromptContext<'_>) {
    let has_situation = ctx.situation.filter(|s| !s.trim().is_empty()).is_some();
    if has_situation {
        prompt.push_str(
            "3. The user's own description of the situation takes precedence \
             over the keywords.\n",
        );
    }
    if !ctx.favorites.is_empty() {
        prompt.push_str(&format!(
            "{}. Use the favorited sentences only to match the user's tone; \
             never copy their content.\n",
            if has_situation { 4 } else { 3 }
        ));
    }
}
