//! Prompt templates for narrative synthesis

pub(crate) const NARRATIVE_SYSTEM: &str = "You are a helpful assistant that identifies the main \
    narrative or theme from a collection of news article excerpts.";

pub(crate) const SUMMARY_SYSTEM: &str =
    "You are an expert analyst who extracts structured information from news articles.";

pub(crate) const SUMMARY_NARRATIVE_SYSTEM: &str = "You are an expert analyst who synthesizes \
    information from multiple sources into coherent narratives.";

/// Prompt asking for a narrative over raw unit texts
pub(crate) fn narrative_prompt(combined_text: &str) -> String {
    format!(
        "Based on these paragraphs, identify a narrative with these details: \
         (a) the actor(s) blamed for causing the event, \
         (b) the actor(s) credited with responding to it, \
         (c) the location where the event took place, and \
         (d) whether the speculated cause is characterized as malicious, accidental, \
         or coordinated.\n\n{}",
        combined_text
    )
}

/// Prompt asking for a six-dimension structured summary of one article
pub(crate) fn summary_prompt(article_text: &str) -> String {
    format!(
        r#"Analyze the following article and provide a structured summary along these dimensions:

1. Blame Attribution:
- Who is blamed or suspected?
- Is the attribution direct, indirect, speculative, or disputed?

2. Victim Entities:
- Who or what is described as attacked, damaged, or negatively impacted?
- Include nations, companies, or infrastructure where applicable.

3. Geographic Scope:
- What specific locations or regions are mentioned?
- Include countries, borders, or sites of critical infrastructure.

4. Plausible Causes:
- What causes or explanations are offered?
- List every plausible cause the article mentions (e.g., sabotage, negligence, accident).

5. Economic Consequences:
- What economic impacts are described or implied?
- Consider trade disruption, outages, rerouting costs, insurance, or industry effects.

6. Environmental Consequences:
- Are any environmental harms mentioned?
- Consider habitat damage, ecological risk, or pollution.

Article:
{}

Format your response as a JSON object with the six dimensions as keys."#,
        article_text
    )
}

/// Prompt asking for a narrative over formatted per-article summaries
pub(crate) fn summary_narrative_prompt(formatted_summaries: &str) -> String {
    format!(
        r#"I have a set of article summaries that belong to the same narrative cluster.
Each summary is structured along six dimensions: Blame Attribution, Victim Entities,
Geographic Scope, Plausible Causes, Economic Consequences, and Environmental Consequences.

Here are the summaries:

{}

Based on these summaries, generate a comprehensive narrative that captures the common
themes, perspectives, and information across these articles. The narrative should:

1. Identify the main actors, locations, and events
2. Highlight consensus and disagreement in blame attribution
3. Summarize the range of causes suggested
4. Describe the scope and scale of impacts
5. Note any unique or outlier perspectives

The narrative should be well-structured, approximately 300-500 words, and should
accurately represent the information contained in the summaries without adding
speculation."#,
        formatted_summaries
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_narrative_prompt_includes_text() {
        let prompt = narrative_prompt("The pipeline ruptured near the coast.");
        assert!(prompt.contains("The pipeline ruptured near the coast."));
        assert!(prompt.contains("blamed for causing"));
        assert!(prompt.contains("malicious, accidental"));
    }

    #[test]
    fn test_summary_prompt_names_all_dimensions() {
        let prompt = summary_prompt("Some article text.");
        assert!(prompt.contains("Blame Attribution"));
        assert!(prompt.contains("Victim Entities"));
        assert!(prompt.contains("Geographic Scope"));
        assert!(prompt.contains("Plausible Causes"));
        assert!(prompt.contains("Economic Consequences"));
        assert!(prompt.contains("Environmental Consequences"));
        assert!(prompt.contains("Some article text."));
        assert!(prompt.contains("JSON object"));
    }

    #[test]
    fn test_summary_narrative_prompt_includes_summaries() {
        let prompt = summary_narrative_prompt("Article 0:\n- Blame Attribution: nobody\n");
        assert!(prompt.contains("Article 0:"));
        assert!(prompt.contains("300-500 words"));
    }
}
