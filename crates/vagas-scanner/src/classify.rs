//! Keyword classification of listing text.
//!
//! Both classifiers search the lower-cased listing text for fixed Portuguese
//! (and a few English) keywords. Lists are checked in order and the first
//! hit wins.

use vagas_core::{Seniority, WorkModel};

const WORK_MODEL_KEYWORDS: [(WorkModel, &[&str]); 3] = [
    (WorkModel::HomeOffice, &["home office", "home-office", "homeoffice"]),
    (WorkModel::Remote, &["remoto", "remota", "remote"]),
    (
        WorkModel::Hybrid,
        &["híbrido", "hibrido", "híbrida", "hibrida", "hybrid"],
    ),
];

// Abbreviations carry a leading space so they only match at a word start.
const SENIORITY_KEYWORDS: [(Seniority, &[&str]); 4] = [
    (
        Seniority::Senior,
        &["sênior", "senior", " sr.", " sr ", "especialista"],
    ),
    (Seniority::MidLevel, &["pleno", " pl.", " pl "]),
    (Seniority::Junior, &["júnior", "junior", " jr.", " jr "]),
    (
        Seniority::Intern,
        &["estágio", "estagio", "estagiário", "estagiario", "trainee"],
    ),
];

/// Lower-case, turn bracket-like punctuation into spaces and pad both ends.
fn normalize(text: &str) -> String {
    let lowered: String = text
        .to_lowercase()
        .chars()
        .map(|c| match c {
            '(' | ')' | '[' | ']' | ',' | ';' | ':' | '/' | '|' => ' ',
            other => other,
        })
        .collect();
    format!(" {lowered} ")
}

fn first_match<T: Copy>(text: &str, table: &[(T, &[&str])]) -> Option<T> {
    let text = normalize(text);
    table
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| text.contains(k)))
        .map(|(label, _)| *label)
}

/// Work model advertised in `text`.
#[must_use]
pub fn classify_work_model(text: &str) -> WorkModel {
    first_match(text, &WORK_MODEL_KEYWORDS).unwrap_or_default()
}

/// Seniority asked for in `text`.
#[must_use]
pub fn classify_seniority(text: &str) -> Seniority {
    first_match(text, &SENIORITY_KEYWORDS).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_work_model_keywords() {
        assert_eq!(
            classify_work_model("Analista - HOME OFFICE"),
            WorkModel::HomeOffice
        );
        assert_eq!(
            classify_work_model("Vaga 100% Remota para devs"),
            WorkModel::Remote
        );
        assert_eq!(
            classify_work_model("Modelo híbrido, 2x na semana"),
            WorkModel::Hybrid
        );
        assert_eq!(
            classify_work_model("Hibrido - Campinas"),
            WorkModel::Hybrid
        );
        assert_eq!(
            classify_work_model("Presencial em Barueri"),
            WorkModel::Unspecified
        );
    }

    #[test]
    fn test_work_model_order() {
        // Home office is checked before remote, remote before hybrid.
        assert_eq!(
            classify_work_model("home office ou remoto"),
            WorkModel::HomeOffice
        );
        assert_eq!(
            classify_work_model("Híbrido ou remoto"),
            WorkModel::Remote
        );
    }

    #[test]
    fn test_seniority_keywords() {
        assert_eq!(
            classify_seniority("Desenvolvedor Java Sênior"),
            Seniority::Senior
        );
        assert_eq!(
            classify_seniority("Analista de Dados Pleno"),
            Seniority::MidLevel
        );
        assert_eq!(
            classify_seniority("Programador JUNIOR"),
            Seniority::Junior
        );
        assert_eq!(
            classify_seniority("Estágio em Suporte"),
            Seniority::Intern
        );
        assert_eq!(
            classify_seniority("Arquiteto de Soluções"),
            Seniority::Unspecified
        );
    }

    #[test]
    fn test_seniority_abbreviations() {
        assert_eq!(classify_seniority("Dev .NET Sr."), Seniority::Senior);
        assert_eq!(classify_seniority("Analista SAP (Jr)"), Seniority::Junior);
        assert_eq!(classify_seniority("Analista Pl/Sr"), Seniority::Senior);
        assert_eq!(classify_seniority("DBA Pl - Oracle"), Seniority::MidLevel);
    }

    #[test]
    fn test_abbreviations_need_word_start() {
        // "usr." and "sprint" must not read as senior / mid-level markers.
        assert_eq!(
            classify_seniority("Config em /usr. e sprint planning"),
            Seniority::Unspecified
        );
    }

    #[test]
    fn test_seniority_order() {
        assert_eq!(
            classify_seniority("Júnior, Pleno ou Sênior"),
            Seniority::Senior
        );
    }
}
