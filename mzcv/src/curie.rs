/// A CURIE is a namespace + accession identifier, as in `UNIMOD:21` or `MOD:00046`.
///
/// The accession is kept as written, leading zeros are significant for some vocabularies.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Curie {
    /// The namespace, e.g. `UNIMOD`
    pub cv: Box<str>,
    /// The local accession within the namespace, e.g. `21`
    pub accession: Box<str>,
}

impl Curie {
    /// Create a new CURIE from its two halves
    pub fn new(cv: impl Into<Box<str>>, accession: impl Into<Box<str>>) -> Self {
        Self {
            cv: cv.into(),
            accession: accession.into(),
        }
    }

    /// If the accession is fully numeric return it as a number
    pub fn numeric_accession(&self) -> Option<u32> {
        self.accession.parse().ok()
    }
}

impl std::fmt::Display for Curie {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.cv, self.accession)
    }
}

/// Errors when interpreting text as a [`Curie`]
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CURIEParsingError {
    /// There is no `:` (or `_`) between namespace and accession
    MissingNamespaceSeparator,
    /// The namespace is empty
    EmptyNamespace,
    /// The accession is empty
    EmptyAccession,
}

impl std::fmt::Display for CURIEParsingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingNamespaceSeparator => write!(f, "missing namespace separator"),
            Self::EmptyNamespace => write!(f, "empty namespace"),
            Self::EmptyAccession => write!(f, "empty accession"),
        }
    }
}

impl std::str::FromStr for Curie {
    type Err = CURIEParsingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (cv, accession) = s
            .trim()
            .split_once(':')
            .or_else(|| s.trim().split_once('_'))
            .ok_or(CURIEParsingError::MissingNamespaceSeparator)?;
        if cv.is_empty() {
            Err(CURIEParsingError::EmptyNamespace)
        } else if accession.is_empty() {
            Err(CURIEParsingError::EmptyAccession)
        } else {
            Ok(Self::new(cv, accession))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::{CURIEParsingError, Curie};

    #[test]
    fn parse_curies() {
        let options = [
            "UNIMOD:21",
            "UNIMOD:214",
            "MOD:00046",
            "MS:1000014",
            "UO:0000245",
            "BAO_0000925", // Seen in one Obo file, but also quite common in URLs
            "XLMOD:07097",
            "GNO:G00001NT",
        ];
        for option in options {
            let curie: Curie = option.parse().unwrap();
            assert_eq!(curie.to_string(), option.replace('_', ":"));
        }
    }

    #[test]
    fn leading_zeros_are_kept() {
        let curie: Curie = "MOD:00046".parse().unwrap();
        assert_eq!(&*curie.accession, "00046");
        assert_eq!(curie.numeric_accession(), Some(46));
    }

    #[test]
    fn invalid_curies() {
        assert_eq!(
            "Phospho".parse::<Curie>(),
            Err(CURIEParsingError::MissingNamespaceSeparator)
        );
        assert_eq!(
            ":21".parse::<Curie>(),
            Err(CURIEParsingError::EmptyNamespace)
        );
        assert_eq!(
            "UNIMOD:".parse::<Curie>(),
            Err(CURIEParsingError::EmptyAccession)
        );
    }
}
