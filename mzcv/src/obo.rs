use std::{
    collections::HashMap,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
    str::FromStr,
};

use context_error::{BoxedError, Context, CreateError};
use flate2::bufread::GzDecoder;

use crate::{CVError, CVVersion};

/// An Obo ontology. This can be read from a file with [`Self::from_file`] or from any buffered
/// reader with [`Self::from_reader`].
#[derive(Clone, Debug, Default)]
pub struct OboOntology {
    /// The data version
    pub data_version: Option<Box<str>>,
    /// The last updated date. (format: year, month, day, hour, min)
    pub date: Option<(u16, u8, u8, u8, u8)>,
    /// The other headers of the Obo file. (tag, value)
    pub headers: Vec<(Box<str>, Box<str>)>,
    /// All enclosed stanzas
    pub objects: Vec<OboStanza>,
}

/// An Obo stanza.
#[derive(Clone, Debug, Default)]
pub struct OboStanza {
    /// The stanza type
    pub stanza_type: OboStanzaType,
    /// The raw id, as in `UNIMOD:21`
    pub id: Box<str>,
    /// The `name` tag
    pub name: Option<Box<str>>,
    /// The `def` field (text, cross references)
    pub definition: Option<(Box<str>, Vec<Box<str>>)>,
    /// The synonyms for this stanza
    pub synonyms: Vec<OboSynonym>,
    /// The raw `xref` values
    pub xrefs: Vec<Box<str>>,
    /// The ids of all parent terms as defined by `is_a`
    pub is_a: Vec<Box<str>>,
    /// If the `is_obsolete` tag is set
    pub obsolete: bool,
    /// All other tags that are defined for this stanza
    pub lines: HashMap<Box<str>, Vec<Box<str>>>,
}

/// A synonym in an Obo stanza
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct OboSynonym {
    /// The synonym itself
    pub synonym: Box<str>,
    /// The type or scope of a synonym
    pub scope: SynonymScope,
    /// Optional synonym type name
    pub type_name: Option<Box<str>>,
    /// The dbxref list
    pub cross_references: Vec<Box<str>>,
}

/// The type or scope for a synonym
#[cfg_attr(feature = "serde", derive(serde::Deserialize, serde::Serialize))]
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum SynonymScope {
    /// An exact relation
    Exact,
    /// A broad relation
    Broad,
    /// A narrow relation
    Narrow,
    /// A related term
    #[default]
    Related,
}

impl FromStr for SynonymScope {
    type Err = ();
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EXACT" => Ok(Self::Exact),
            "BROAD" => Ok(Self::Broad),
            "NARROW" => Ok(Self::Narrow),
            "RELATED" => Ok(Self::Related),
            _ => Err(()),
        }
    }
}

/// The type for an Obo stanza
#[derive(Clone, Copy, Debug, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum OboStanzaType {
    /// A Term stanza
    #[default]
    Term,
    /// A Typedef stanza
    Typedef,
    /// An instance stanza, generally not used
    Instance,
}

impl OboOntology {
    /// Parse an [`OboOntology`] from a path. Files ending in `.gz` are decompressed on the fly.
    /// # Errors
    /// If the file could not be opened or the text contained is not valid according to the Obo format.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BoxedError<'static, CVError>> {
        let base_context = Context::none()
            .source(path.as_ref().to_string_lossy())
            .to_owned();
        log::debug!("Reading Obo file '{}'", path.as_ref().display());
        let file = File::open(path.as_ref()).map_err(|e| {
            BoxedError::new(
                CVError::FileCouldNotBeOpened,
                "Could not open file",
                e.to_string(),
                base_context.clone(),
            )
        })?;
        if path
            .as_ref()
            .extension()
            .is_some_and(|ext| ext.eq_ignore_ascii_case("gz"))
        {
            Self::from_reader_internal(
                BufReader::new(GzDecoder::new(BufReader::new(file))),
                &base_context,
            )
        } else {
            Self::from_reader_internal(BufReader::new(file), &base_context)
        }
    }

    /// Parse an [`OboOntology`] from a buffered reader.
    /// # Errors
    /// If the text contained is not valid according to the Obo format.
    pub fn from_reader(reader: impl BufRead) -> Result<Self, BoxedError<'static, CVError>> {
        Self::from_reader_internal(reader, &Context::none())
    }

    fn from_reader_internal(
        reader: impl BufRead,
        base_context: &Context<'static>,
    ) -> Result<Self, BoxedError<'static, CVError>> {
        let mut obo = Self::default();
        let mut recent_obj: Option<OboStanza> = None;

        for (line_index, line) in reader.lines().enumerate() {
            let line = line
                .map_err(|e| {
                    BoxedError::new(
                        CVError::CouldNotReadLine,
                        "Could not read line",
                        e.to_string(),
                        base_context.clone().line_index(line_index as u32),
                    )
                })?
                .trim_end()
                .to_string();
            if line.is_empty() || line.starts_with('!') {
                continue;
            }
            let context = || {
                base_context
                    .clone()
                    .lines(0, line.clone())
                    .line_index(line_index as u32)
            };

            if line.starts_with('[') && line.ends_with(']') {
                if let Some(obj) = recent_obj.take() {
                    obo.objects.push(obj);
                }
                let stanza_type = match line[1..line.len() - 1]
                    .trim()
                    .to_ascii_lowercase()
                    .as_str()
                {
                    "term" => OboStanzaType::Term,
                    "typedef" => OboStanzaType::Typedef,
                    "instance" => OboStanzaType::Instance,
                    _ => {
                        return Err(BoxedError::new(
                            CVError::InvalidStanzaType,
                            "Invalid Obo stanza",
                            "The stanza types has to be any of Term, Typedef, or Instance",
                            context(),
                        ));
                    }
                };
                recent_obj = Some(OboStanza {
                    stanza_type,
                    ..OboStanza::default()
                });
            } else if let Some((tag, value_line)) = line.split_once(':') {
                let value_line = strip_modifiers_and_comment(value_line).map_err(|close| {
                    BoxedError::new(
                        CVError::InvalidLine,
                        "Invalid Obo line",
                        format!("This line is enclosed with '{close}' but this is not closed"),
                        context(),
                    )
                })?;

                if let Some(obj) = &mut recent_obj {
                    match tag.trim() {
                        "id" => obj.id = unescape(value_line),
                        "name" => obj.name = Some(unescape(value_line)),
                        "def" => {
                            let parts = tokenise(value_line).map_err(|close| {
                                BoxedError::new(
                                    CVError::InvalidDefinition,
                                    "Invalid def line",
                                    format!(
                                        "The line did not contain the closing delimiter: `{close}`",
                                    ),
                                    context(),
                                )
                            })?;
                            match parts.as_slice() {
                                [(Some('"'), text)] => {
                                    obj.definition = Some((unescape(text), Vec::new()));
                                }
                                [(Some('"'), text), (Some(']'), xrefs)] => {
                                    obj.definition = Some((unescape(text), parse_dbxref(xrefs)));
                                }
                                _ => {
                                    return Err(BoxedError::new(
                                        CVError::InvalidDefinition,
                                        "Invalid def line",
                                        "A def line should look like `\"text\" [DBXREF]`",
                                        context(),
                                    ));
                                }
                            }
                        }
                        "synonym" => {
                            let parts = tokenise(value_line).map_err(|close| {
                                BoxedError::new(
                                    CVError::InvalidSynonym,
                                    "Invalid synonym line",
                                    format!(
                                        "The line did not contain the closing delimiter: `{close}`",
                                    ),
                                    context(),
                                )
                            })?;
                            obj.synonyms.push(parse_synonym(&parts).ok_or_else(|| {
                                BoxedError::new(
                                    CVError::InvalidSynonym,
                                    "Invalid synonym line",
                                    "A synonym line should look like `\"text\" SCOPE TYPE? [DBXREF]`, with SCOPE one of EXACT, BROAD, NARROW, RELATED",
                                    context(),
                                )
                            })?);
                        }
                        "xref" => obj.xrefs.push(unescape(value_line)),
                        "is_a" => obj.is_a.push(unescape(value_line)),
                        "is_obsolete" => obj.obsolete = value_line.eq_ignore_ascii_case("true"),
                        other => obj
                            .lines
                            .entry(other.into())
                            .or_default()
                            .push(unescape(value_line)),
                    }
                } else if tag.eq_ignore_ascii_case("data-version") {
                    obo.data_version = Some(unescape(value_line));
                } else if tag.eq_ignore_ascii_case("date") {
                    obo.date = Some(parse_date(value_line).ok_or_else(|| {
                        BoxedError::new(
                            CVError::InvalidDate,
                            "Invalid date time",
                            "The date time does not follow the format of 'dd:mm:yyyy hh:mm'",
                            context(),
                        )
                    })?);
                } else {
                    obo.headers.push((tag.trim().into(), unescape(value_line)));
                }
            } else {
                return Err(BoxedError::new(
                    CVError::InvalidLine,
                    "Invalid Obo line",
                    "This line could not be recognised as a valid line in the Obo format",
                    context(),
                ));
            }
        }
        if let Some(obj) = recent_obj {
            obo.objects.push(obj);
        }
        log::debug!("Read {} Obo stanzas", obo.objects.len());
        Ok(obo)
    }

    /// Get the version of this Obo file as parsed from the file
    pub fn version(&self) -> CVVersion {
        CVVersion {
            last_updated: self.date,
            version: self.data_version.as_ref().map(ToString::to_string),
        }
    }
}

fn unescape(value: &str) -> Box<str> {
    let mut result = String::new();
    let mut escaped = false;
    for c in value.trim().chars() {
        if c == '\\' && !escaped {
            escaped = true;
        } else {
            result.push(c);
            escaped = false;
        }
    }
    result.into_boxed_str()
}

/// Parse `dd:mm:yyyy hh:mm` into (year, month, day, hour, minute)
fn parse_date(text: &str) -> Option<(u16, u8, u8, u8, u8)> {
    let (date, time) = text.trim().split_once(' ')?;
    let (hour, minute) = time.trim().split_once(':')?;
    let mut date = date.splitn(3, ':');
    let day = date.next()?.parse().ok()?;
    let month = date.next()?.parse().ok()?;
    let year = date.next()?.parse().ok()?;
    Some((year, month, day, hour.parse().ok()?, minute.parse().ok()?))
}

fn parse_synonym(parts: &[(Option<char>, &str)]) -> Option<OboSynonym> {
    let (first, rest) = parts.split_first()?;
    if first.0 != Some('"') || rest.len() > 3 {
        return None;
    }
    let mut synonym = OboSynonym {
        synonym: unescape(first.1),
        ..OboSynonym::default()
    };
    for (index, (enclosed, text)) in rest.iter().enumerate() {
        match (index, enclosed) {
            (_, Some(']')) => synonym.cross_references = parse_dbxref(text),
            (0, None) => synonym.scope = text.parse().ok()?,
            (1, None) => synonym.type_name = Some(unescape(text)),
            _ => return None,
        }
    }
    Some(synonym)
}

/// Cut off the trailing modifiers (`{...}`) and comment (`! ...`) from a value line.
/// Returns the closing character if an enclosure was not closed.
fn strip_modifiers_and_comment(text: &str) -> Result<&str, char> {
    let mut enclosed: Option<char> = None;
    let mut escaped = false;
    let mut end = text.len();

    for (index, char) in text.char_indices() {
        if !escaped {
            if let Some(close) = enclosed {
                if close == char {
                    enclosed = None;
                }
            } else if char == '"' {
                enclosed = Some('"');
            } else if char == '{' || char == '!' {
                end = index;
                if char == '{' && !text[index..].contains('}') {
                    return Err('}');
                }
                break;
            }
        }
        escaped = char == '\\' && !escaped;
    }

    if let Some(close) = enclosed {
        return Err(close);
    }
    Ok(text[..end].trim())
}

/// Split into parts with the enclosing characters
fn tokenise(text: &str) -> Result<Vec<(Option<char>, &str)>, char> {
    let mut parts = Vec::new();
    let mut enclosed = None;
    let mut start = None;
    let mut escaped = false;
    for (index, char) in text.char_indices() {
        if !escaped {
            if let Some(s) = start {
                if let Some(close) = enclosed {
                    if char == close {
                        parts.push((Some(close), text[s + 1..index].trim()));
                        start = None;
                        enclosed = None;
                    }
                } else if char == ' ' {
                    parts.push((None, text[s..index].trim()));
                    start = None;
                }
            } else {
                match char {
                    '"' => enclosed = Some('"'),
                    '[' => enclosed = Some(']'),
                    ' ' => {
                        escaped = false;
                        continue;
                    }
                    _ => (),
                }
                start = Some(index);
            }
        }
        escaped = char == '\\' && !escaped;
    }
    if let Some(s) = start {
        if let Some(close) = enclosed {
            return Err(close);
        }
        parts.push((None, text[s..].trim()));
    }
    Ok(parts)
}

fn parse_dbxref(text: &str) -> Vec<Box<str>> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(unescape)
        .collect()
}
