use crate::{
    chemistry::{WATER_MASS, residue_mass},
    diagnostics::{Diagnostic, DiagnosticCode, DiagnosticResponse},
    modification::ModificationDescriptor,
    ontology::Ontologies,
    peptidoform::{Peptidoform, Residue, Terminal},
};

/// A residue as found by the scanner, before it is interpreted
#[derive(Debug)]
struct RawResidue {
    text: String,
    /// Found before the first amino acid, so this can only hold an N terminal modification
    initial: bool,
}

impl Peptidoform {
    /// Parse a peptidoform, resolving all modifications with the given ontologies.
    ///
    /// This never fails, all problems are reported in the returned response and reflected in
    /// [`Self::is_valid`]. Parsing continues after most problems to report as many as possible.
    /// ```rust
    /// use mzusi::{Ontologies, Peptidoform};
    /// let (peptidoform, response) = Peptidoform::parse("PEPT[+79.966]IDE", &Ontologies::empty());
    /// assert!(response.is_valid());
    /// assert_eq!(peptidoform.peptide_sequence, "PEPTIDE");
    /// ```
    pub fn parse(text: &str, ontologies: &Ontologies) -> (Self, DiagnosticResponse) {
        let mut response = DiagnosticResponse::new();
        let mut peptidoform = Self {
            peptidoform_string: text.to_string(),
            ..Self::default()
        };
        if text.is_empty() {
            response.add(
                DiagnosticCode::NoPeptidoform,
                "No peptidoform string is available to parse",
            );
            return (peptidoform, response);
        }

        let (raw_residues, labile) = scan(text, &mut response);
        let mut neutral_mass = WATER_MASS;

        for group in labile {
            let (descriptor, valid) =
                resolve_into(strip_enclosure(&group), ontologies, &mut response);
            if !valid {
                response.add(
                    DiagnosticCode::ErrorInPeptidoform,
                    format!("Error parsing unlocalized mass modification {group}"),
                );
            }
            peptidoform.labile_mass += descriptor.delta_mass().unwrap_or_default();
            peptidoform.unlocalized_modifications.push(descriptor);
        }

        let last = raw_residues.len().saturating_sub(1);
        for (index, raw) in raw_residues.into_iter().enumerate() {
            let mut residue = Residue {
                index,
                residue_string: raw.text.clone(),
                base_residue: None,
                terminal: None,
                modification: None,
            };

            if raw.text.chars().count() > 1 {
                let trimmed = raw.text.trim_end_matches('-');
                let enclosed = if raw.initial {
                    residue.terminal = Some(Terminal::NTerm);
                    trimmed
                } else {
                    let mut chars = trimmed.chars();
                    match chars.next() {
                        Some('-') => residue.terminal = Some(Terminal::CTerm),
                        amino_acid => residue.base_residue = amino_acid,
                    }
                    chars.as_str()
                };

                let (descriptor, valid) =
                    resolve_into(strip_enclosure(enclosed), ontologies, &mut response);
                if !valid {
                    response.add(
                        DiagnosticCode::ErrorInPeptidoform,
                        format!("Error parsing residue {index}: {}", raw.text),
                    );
                }

                if enclosed.starts_with('{') {
                    peptidoform.labile_mass += descriptor.delta_mass().unwrap_or_default();
                    peptidoform.unlocalized_modifications.push(descriptor);
                } else {
                    neutral_mass += descriptor.delta_mass().unwrap_or_default();
                    match residue.terminal {
                        Some(terminal) => {
                            peptidoform
                                .terminal_modifications
                                .insert(terminal, descriptor.clone());
                        }
                        None => {
                            peptidoform
                                .residue_modifications
                                .insert(index, descriptor.clone());
                        }
                    }
                    residue.modification = Some(descriptor);
                }
            } else {
                match raw.text.chars().next() {
                    Some('-') if raw.initial => residue.terminal = Some(Terminal::NTerm),
                    Some('-') => residue.terminal = Some(Terminal::CTerm),
                    amino_acid => residue.base_residue = amino_acid,
                }
            }

            if residue.terminal == Some(Terminal::CTerm) && index != last {
                response.add(
                    DiagnosticCode::MisplacedTerminal,
                    format!(
                        "A dash is only allowed at the termini, found one at residue {index}: {}",
                        raw.text
                    ),
                );
            }

            if let Some(amino_acid) = residue.base_residue {
                peptidoform.peptide_sequence.push(amino_acid);
                if let Some(mass) = residue_mass(amino_acid) {
                    neutral_mass += mass;
                } else {
                    response.add(
                        DiagnosticCode::UnknownAminoAcid,
                        format!("Unable to determine mass of amino acid {amino_acid}"),
                    );
                }
            }
            peptidoform.residues.push(residue);
        }

        peptidoform.neutral_mass = Some(neutral_mass);
        peptidoform.is_valid = response.is_valid();
        log::debug!(
            "Parsed peptidoform '{text}': {} residues, neutral mass {neutral_mass}, {} errors",
            peptidoform.residues.len(),
            response.n_errors()
        );
        (peptidoform, response)
    }
}

/// Resolve a modification, returns if it was resolved without errors
fn resolve_into(
    text: &str,
    ontologies: &Ontologies,
    response: &mut DiagnosticResponse,
) -> (ModificationDescriptor, bool) {
    let mut local = DiagnosticResponse::new();
    let descriptor = ModificationDescriptor::resolve(text, ontologies, &mut local);
    let valid = local.is_valid();
    response.merge(local);
    (descriptor, valid)
}

/// Remove the first and last character, the enclosing brackets
fn strip_enclosure(text: &str) -> &str {
    let mut chars = text.chars();
    chars.next();
    chars.next_back();
    chars.as_str()
}

/// Split the text into residues, with any modifications still attached, and leading labile
/// modification groups. Empty residues are removed.
fn scan(text: &str, response: &mut DiagnosticResponse) -> (Vec<RawResidue>, Vec<String>) {
    let mut residues = Vec::new();
    let mut labile = Vec::new();
    let mut current = String::new();
    let mut square_depth = 0_usize;
    let mut curly_depth = 0_usize;

    for (position, c) in text.char_indices() {
        let initial = residues.is_empty();
        match c {
            '[' => {
                square_depth += 1;
                current.push(c);
            }
            ']' if square_depth == 0 => response.push(
                Diagnostic::new(
                    DiagnosticCode::UnmatchedBracket,
                    format!("Unmatched square bracket at position {position}"),
                )
                .at(position),
            ),
            ']' => {
                square_depth -= 1;
                current.push(c);
            }
            '{' => {
                curly_depth += 1;
                current.push(c);
            }
            '}' if curly_depth == 0 => response.push(
                Diagnostic::new(
                    DiagnosticCode::UnmatchedBracket,
                    format!("Unmatched curly bracket at position {position}"),
                )
                .at(position),
            ),
            '}' => {
                curly_depth -= 1;
                current.push(c);
                if curly_depth == 0 && initial {
                    labile.push(std::mem::take(&mut current));
                }
            }
            _ if square_depth > 0 || curly_depth > 0 => current.push(c),
            '-' if initial => current.push(c),
            _ => {
                residues.push(RawResidue {
                    text: std::mem::take(&mut current),
                    initial,
                });
                current.push(c);
            }
        }
    }

    if square_depth > 0 {
        response.add(
            DiagnosticCode::UnmatchedBracket,
            format!("{square_depth} square bracket(s) are not closed"),
        );
    }
    if curly_depth > 0 {
        response.add(
            DiagnosticCode::UnmatchedBracket,
            format!("{curly_depth} curly bracket(s) are not closed"),
        );
    }
    if !current.is_empty() {
        residues.push(RawResidue {
            text: current,
            initial: residues.is_empty(),
        });
    }
    residues.retain(|r| !r.text.is_empty());
    (residues, labile)
}
