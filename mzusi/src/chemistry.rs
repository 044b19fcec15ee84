//! The masses needed to calculate the neutral mass of a peptidoform and the m/z of an ion.

/// The mass of a proton
pub const PROTON_MASS: f64 = 1.00727646688;
/// The monoisotopic mass of hydrogen
pub const HYDROGEN_MASS: f64 = 1.007825035;
/// The monoisotopic mass of oxygen
pub const OXYGEN_MASS: f64 = 15.99491463;
/// The monoisotopic mass of water, the starting point for the mass of any peptidoform
pub const WATER_MASS: f64 = 2.0 * HYDROGEN_MASS + OXYGEN_MASS;

/// Get the monoisotopic residue mass of an amino acid. `X` denotes a gap of unknown residues and
/// has no mass of its own. Ambiguous codes (`B`, `Z`, `J`) have no defined mass.
pub const fn residue_mass(amino_acid: char) -> Option<f64> {
    Some(match amino_acid {
        'G' => 57.021463735,
        'A' => 71.037113805,
        'S' => 87.032028435,
        'P' => 97.052763875,
        'V' => 99.068413945,
        'T' => 101.047678505,
        'C' => 103.009184505,
        'L' | 'I' => 113.084064015,
        'N' => 114.042927470,
        'D' => 115.026943065,
        'Q' => 128.058577540,
        'K' => 128.094963050,
        'E' => 129.042593135,
        'M' => 131.040484645,
        'O' => 132.089877680,
        'H' => 137.058911875,
        'F' => 147.068413945,
        'U' => 150.953633405,
        'R' => 156.101111050,
        'Y' => 163.063328575,
        'W' => 186.079312980,
        'X' => 0.0,
        _ => return None,
    })
}

/// Calculate the m/z of a peptidoform with the given neutral mass when charged by protons.
/// Returns `None` for a charge of zero.
pub fn mz(neutral_mass: f64, charge: i32) -> Option<f64> {
    (charge != 0).then(|| {
        let charge = f64::from(charge);
        PROTON_MASS.mul_add(charge, neutral_mass) / charge
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn water() {
        assert!((WATER_MASS - 18.0105647).abs() < 1e-9);
    }

    #[test]
    fn residues() {
        assert_eq!(residue_mass('L'), residue_mass('I'));
        assert_eq!(residue_mass('X'), Some(0.0));
        assert_eq!(residue_mass('B'), None);
        assert_eq!(residue_mass('a'), None);
    }

    #[test]
    fn charge() {
        assert_eq!(mz(1000.0, 0), None);
        assert!((mz(1000.0, 1).unwrap() - 1001.00727646688).abs() < 1e-9);
        assert!((mz(1000.0, 2).unwrap() - 501.00727646688).abs() < 1e-9);
    }
}
