//! Review prompt templates

use crate::blob::Framing;

/// Prompt for a blob that fits in one call
pub fn single_shot_prompt(framing: Framing, text: &str) -> String {
    match framing {
        Framing::Diff => format!("Revise o diff a seguir:\n```diff\n{}\n```", text),
        Framing::Files => format!("Revise os arquivos abaixo:\n{}", text),
    }
}

/// Prompt for one segment of an oversized blob
pub fn segment_prompt(framing: Framing, segment: &str) -> String {
    match framing {
        Framing::Diff => format!("Revise esta parte do diff:\n```diff\n{}\n```", segment),
        Framing::Files => format!("Revise esta parte dos arquivos:\n{}", segment),
    }
}

/// Prompt that merges the partial reports, in segment order
pub fn consolidation_prompt(partials: &[String]) -> String {
    format!(
        "Consolide o relatório a seguir em um único resumo:\n{}",
        partials.join("\n\n")
    )
}
