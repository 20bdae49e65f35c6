use winnow::ascii::space0;
use winnow::combinator::{alt, opt, preceded};
use winnow::prelude::*;
use winnow::token::{one_of, take_till};

use crate::acl::{AclScope, EntryTag, PermissionBits, PermissionSet, PermissionSetBuilder};
use crate::codec::escape::{unescape_qualifier, EscapeError};

/// Parses the text produced by `getfacl` for a single filesystem object into a [`PermissionSet`].
///
/// The `# owner:` and `# group:` header comments name the owning user and group, every other line
/// is an entry in the `[default:]tag:qualifier:perms` form optionally followed by an
/// `#effective:` comment. The effective permissions getfacl prints are ignored as the engine
/// applies the mask itself. Both the long (`user`, `default:`) and short (`u`, `d:`) tag spellings
/// are accepted so hand written `setfacl` style fixtures parse as well.
pub fn parse_getfacl(text: &str) -> Result<PermissionSet, GetfaclParseError> {
    let mut builder = PermissionSetBuilder::default();
    let mut seen_file = false;

    for (idx, raw_line) in text.lines().enumerate() {
        let line_number = idx + 1;
        let line = raw_line.trim();

        if line.is_empty() {
            continue;
        }

        if line.starts_with('#') {
            let Ok((key, value)) = header_comment.parse(line) else {
                if cfg!(feature = "strict") {
                    return Err(GetfaclParseError::UnknownComment(line_number));
                }

                tracing::trace!(line_number, "getfacl::skipped_comment");
                continue;
            };

            let unescape = |value: &str| {
                unescape_qualifier(value)
                    .map_err(|err| GetfaclParseError::InvalidEscape(line_number, err))
            };

            builder = match key {
                "owner" => builder.owner_name(unescape(value)?),
                "group" => builder.group_name(unescape(value)?),
                "file" if seen_file => {
                    return Err(GetfaclParseError::MultipleObjects(line_number));
                }
                "file" => {
                    seen_file = true;
                    tracing::trace!(file = value, "getfacl::file");
                    builder
                }
                "flags" => builder,
                _ if cfg!(feature = "strict") => {
                    return Err(GetfaclParseError::UnknownComment(line_number));
                }
                _ => builder,
            };

            continue;
        }

        let parsed = entry_line
            .parse(line)
            .map_err(|err| GetfaclParseError::MalformedEntry {
                line: line_number,
                offset: err.offset(),
                content: line.to_string(),
            })?;

        let tag = match (parsed.kind, parsed.qualifier.is_empty()) {
            (EntryKind::User, true) => EntryTag::Owner,
            (EntryKind::User, false) => EntryTag::NamedUser,
            (EntryKind::Group, true) => EntryTag::OwningGroup,
            (EntryKind::Group, false) => EntryTag::NamedGroup,
            (EntryKind::Other, true) => EntryTag::Other,
            (EntryKind::Mask, true) => EntryTag::Mask,
            (kind, false) => {
                return Err(GetfaclParseError::UnexpectedQualifier(line_number, kind.as_str()));
            }
        };

        let qualifier = unescape_qualifier(parsed.qualifier)
            .map_err(|err| GetfaclParseError::InvalidEscape(line_number, err))?;

        builder = builder.entry(parsed.scope, tag, qualifier, parsed.bits);
    }

    Ok(builder.build())
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GetfaclParseError {
    #[error("line {0}: invalid escape sequence in name: {1}")]
    InvalidEscape(usize, EscapeError),

    #[error("line {line}: malformed acl entry '{content}' (at offset {offset})")]
    MalformedEntry {
        line: usize,
        offset: usize,
        content: String,
    },

    #[error("line {0}: output describes more than one file, only a single object is supported")]
    MultipleObjects(usize),

    #[error("line {0}: {1} entries can't carry a qualifier")]
    UnexpectedQualifier(usize, &'static str),

    #[error("line {0}: unrecognized comment")]
    UnknownComment(usize),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryKind {
    User,
    Group,
    Other,
    Mask,
}

impl EntryKind {
    fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Group => "group",
            Self::Other => "other",
            Self::Mask => "mask",
        }
    }
}

#[derive(Debug, PartialEq)]
struct EntryLine<'i> {
    scope: AclScope,
    kind: EntryKind,
    qualifier: &'i str,
    bits: PermissionBits,
}

fn entry_kind(input: &mut &str) -> PResult<EntryKind> {
    alt((
        alt(("user", "u")).value(EntryKind::User),
        alt(("group", "g")).value(EntryKind::Group),
        alt(("other", "o")).value(EntryKind::Other),
        alt(("mask", "m")).value(EntryKind::Mask),
    ))
    .parse_next(input)
}

fn entry_line<'i>(input: &mut &'i str) -> PResult<EntryLine<'i>> {
    let scope = opt(alt(("default:", "d:")))
        .map(|prefix: Option<&str>| match prefix {
            Some(_) => AclScope::Default,
            None => AclScope::Access,
        })
        .parse_next(input)?;

    let kind = entry_kind.parse_next(input)?;
    let qualifier = preceded(':', take_till(0.., ':')).parse_next(input)?;
    let bits = preceded(':', permission_bits).parse_next(input)?;

    let _effective = opt(preceded((space0, "#effective:"), permission_bits)).parse_next(input)?;
    space0.parse_next(input)?;

    Ok(EntryLine {
        scope,
        kind,
        qualifier,
        bits,
    })
}

fn header_comment<'i>(input: &mut &'i str) -> PResult<(&'i str, &'i str)> {
    ('#', space0).parse_next(input)?;
    let key = take_till(1.., [':', ' ', '\t']).parse_next(input)?;
    (':', space0).parse_next(input)?;
    let value = take_till(0.., '\n').parse_next(input)?;

    Ok((key, value.trim_end()))
}

fn permission_bits(input: &mut &str) -> PResult<PermissionBits> {
    let read = one_of(['r', '-']).map(|c: char| c == 'r').parse_next(input)?;
    let write = one_of(['w', '-']).map(|c: char| c == 'w').parse_next(input)?;
    let execute = one_of(['x', '-']).map(|c: char| c == 'x').parse_next(input)?;

    Ok(PermissionBits::new(read, write, execute))
}
