// Cross-cutting prompt fragments. Each module that calls the oracle keeps its
// own prompts.rs alongside it and appends these where they apply.

/// Appended to every prompt whose response is recovered as a JSON object.
pub const JSON_ONLY_INSTRUCTION: &str = "\
    Respond with a single valid JSON object only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

/// Appended to prompts whose response is read as a bare number.
pub const NUMBER_ONLY_INSTRUCTION: &str = "\
    Return ONLY the final numeric score between 0 and 100. \
    Do NOT include reasoning, words, units or formatting.";

/// Shared guard against invented resume content.
pub const NO_HALLUCINATION_INSTRUCTION: &str = "\
    Evaluate only what is explicitly present in the input. \
    Do NOT infer, invent or embellish items that are not there.";
