//! Prompt templates for stance-framed consultations

use crate::consensus::Stance;

/// Marker phrase present in the canned supportive preamble
pub const SUPPORTIVE_MARKER: &str = "SUPPORTIVE PERSPECTIVE";
/// Marker phrase present in the canned critical preamble
pub const CRITICAL_MARKER: &str = "CRITICAL PERSPECTIVE";
/// Marker phrase present in the canned balanced preamble
pub const BALANCED_MARKER: &str = "BALANCED PERSPECTIVE";

/// Templates for generating consultation prompts
pub struct ConsensusPromptTemplate;

impl ConsensusPromptTemplate {
    /// Canned preamble for a stance.
    ///
    /// Free-text stance labels get the balanced framing, with the label named
    /// so the model knows which role it is playing.
    pub fn stance_preamble(stance: &Stance) -> String {
        match stance {
            Stance::For => format!(
                r#"{SUPPORTIVE_MARKER} WITH INTEGRITY

You are asked to advocate FOR this proposal. Focus on its benefits and strengths:
the value it delivers to users, how well it scales, and the opportunities it opens up.
Build the strongest honest case in its favour.

Guardrails: if the proposal is fundamentally flawed, harmful or unworkable, say so
plainly. Being supportive never means endorsing a bad idea."#
            ),
            Stance::Against => format!(
                r#"{CRITICAL_MARKER} WITH RESPONSIBILITY

You are asked to critique this proposal. Focus on risks and weaknesses:
implementation complexity, hidden costs, long-term maintenance burden, and
simpler alternatives that would achieve the same goal.

Guardrails: if the proposal is genuinely sound, acknowledge it. Being critical
never means inventing problems that are not there."#
            ),
            Stance::Neutral => Self::balanced_preamble(),
            Stance::Custom(label) => format!(
                "{}\n\nYour assigned role for this consultation: {label}.",
                Self::balanced_preamble()
            ),
        }
    }

    fn balanced_preamble() -> String {
        format!(
            r#"{BALANCED_MARKER}

Give an objective assessment that weighs both sides. Cover the real benefits
and the real drawbacks, and let the evidence decide where you land. Do not
manufacture balance where one side is clearly stronger."#
        )
    }

    /// Full system prompt for one pair.
    ///
    /// A caller-supplied `stance_prompt` replaces the canned preamble entirely.
    pub fn system_prompt(stance: &Stance, stance_prompt: Option<&str>) -> String {
        let perspective = match stance_prompt.map(str::trim) {
            Some(custom) if !custom.is_empty() => custom.to_string(),
            _ => Self::stance_preamble(stance),
        };

        format!(
            r#"ROLE
You are an expert technical consultant taking part in a multi-model consensus review.
Several models are answering the same question, each from an assigned perspective.

PERSPECTIVE FRAMEWORK
{perspective}

YOUR RESPONSE
Structure your answer with these sections:
## Verdict
One sentence stating your overall assessment.
## Analysis
Technical feasibility, project fit, user value, implementation complexity,
alternatives and long-term implications.
## Confidence Score
A number from 1 to 10 with a short justification.
## Key Takeaways
Three to five actionable bullet points.

Stay grounded in what is actually proposed. Be specific and concise."#
        )
    }

    /// User prompt carrying the proposal under review
    pub fn user_prompt(proposal: &str) -> String {
        format!(
            r#"Evaluate the following proposal:

{proposal}

Respond from your assigned perspective."#
        )
    }

    /// Guidance returned to the calling agent alongside the results
    pub fn next_steps(succeeded: usize, requested: usize) -> String {
        format!(
            "All {requested} requested consultations have settled ({succeeded} succeeded). \
             Review every model response in this step, note where the perspectives agree \
             and disagree, and synthesize them into a final recommendation. Failed pairs \
             can be retried individually."
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canned_markers_per_stance() {
        assert!(ConsensusPromptTemplate::system_prompt(&Stance::For, None).contains(SUPPORTIVE_MARKER));
        assert!(ConsensusPromptTemplate::system_prompt(&Stance::Against, None).contains(CRITICAL_MARKER));
        assert!(ConsensusPromptTemplate::system_prompt(&Stance::Neutral, None).contains(BALANCED_MARKER));
    }

    #[test]
    fn test_custom_stance_prompt_replaces_canned_text() {
        let prompt = ConsensusPromptTemplate::system_prompt(&Stance::For, Some("Focus on X"));
        assert!(prompt.contains("Focus on X"));
        assert!(!prompt.contains(SUPPORTIVE_MARKER));
    }

    #[test]
    fn test_blank_stance_prompt_falls_back_to_canned_text() {
        let prompt = ConsensusPromptTemplate::system_prompt(&Stance::Against, Some("   "));
        assert!(prompt.contains(CRITICAL_MARKER));
    }

    #[test]
    fn test_free_text_label_gets_balanced_framing() {
        let stance = Stance::Custom("security-reviewer".to_string());
        let prompt = ConsensusPromptTemplate::system_prompt(&stance, None);
        assert!(prompt.contains(BALANCED_MARKER));
        assert!(prompt.contains("security-reviewer"));
    }

    #[test]
    fn test_user_prompt_contains_proposal() {
        let prompt = ConsensusPromptTemplate::user_prompt("Adopt OAuth2");
        assert!(prompt.contains("Adopt OAuth2"));
    }
}
