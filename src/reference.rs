use rand::Rng;
#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
use rand::SeedableRng;
#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
use rand::rngs::StdRng;
use winnow::ascii::{dec_uint, digit1, multispace1};
use winnow::combinator::separated;
use winnow::error::{StrContext, StrContextValue};
use winnow::{ModalResult, Parser};

use crate::error::{Error, Result};

pub type Page = u32;

/// length used when the caller does not ask for a specific one
pub const DEFAULT_LENGTH: usize = 20;

/// shortest reference string the drivers accept for visualization
pub const MIN_VISUAL_LENGTH: usize = 20;

/// generated pages are drawn from `0..=MAX_GENERATED_PAGE`
pub const MAX_GENERATED_PAGE: Page = 9;

/// Generates `length` pages drawn uniformly from the digits `0..=9`, seeded from the OS.
#[cfg(not(all(target_arch = "wasm32", target_os = "unknown")))]
pub fn generate_reference_string(length: usize) -> Result<Vec<Page>> {
    generate_reference_string_with(&mut StdRng::from_os_rng(), length)
}

/// Same as [`generate_reference_string`] but with a caller supplied rng,
/// so a seeded `StdRng` always reproduces the same reference string.
pub fn generate_reference_string_with<R: Rng>(rng: &mut R, length: usize) -> Result<Vec<Page>> {
    if length == 0 {
        return Err(Error::InvalidArgument(
            "reference string length must be a positive integer".to_string(),
        ));
    }

    Ok((0..length)
        .map(|_| rng.random_range(0..=MAX_GENERATED_PAGE))
        .collect())
}

/// Parses a reference string.
///
/// The shape is decided once per call:
/// - text containing whitespace is a list of whitespace-separated integers (`"12 3 7"` is `[12, 3, 7]`)
/// - text without whitespace must be a run of digits, each digit is one page (`"1237"` is `[1, 2, 3, 7]`)
///
/// So a single multi-digit page can not be written on its own, `"12"` always reads as `[1, 2]`.
pub fn parse_reference_string(text: &str) -> Result<Vec<Page>> {
    let text = text.trim();
    if text.is_empty() {
        return Err(Error::ParseError("reference string is empty".to_string()));
    }

    let pages = if text.contains(char::is_whitespace) {
        page_list.parse(text)?
    } else {
        digit_run.parse(text)?
    };

    Ok(pages)
}

/// Space separated rendering, the inverse of [`parse_reference_string`] for two or more pages.
pub fn format_reference_string(pages: &[Page]) -> String {
    pages
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Rejects reference strings that are too short to be worth visualizing.
/// The simulators themselves accept any length.
pub fn ensure_visual_length(pages: &[Page]) -> Result<()> {
    if pages.len() < MIN_VISUAL_LENGTH {
        log::warn!(
            "rejecting reference string of length {} (minimum {MIN_VISUAL_LENGTH})",
            pages.len()
        );
        return Err(Error::InvalidArgument(format!(
            "reference string needs at least {MIN_VISUAL_LENGTH} pages, got {}",
            pages.len()
        )));
    }

    Ok(())
}

fn page_list(input: &mut &str) -> ModalResult<Vec<Page>> {
    separated(1.., page, multispace1)
        .context(StrContext::Label("page list"))
        .parse_next(input)
}

fn page(input: &mut &str) -> ModalResult<Page> {
    dec_uint::<_, Page, _>
        .context(StrContext::Label("page"))
        .context(StrContext::Expected(StrContextValue::Description(
            "a non-negative integer page number",
        )))
        .parse_next(input)
}

fn digit_run(input: &mut &str) -> ModalResult<Vec<Page>> {
    digit1
        .context(StrContext::Label("digit run"))
        .context(StrContext::Expected(StrContextValue::Description(
            "digits (0-9), one page per digit",
        )))
        .map(|digits: &str| digits.bytes().map(|b| Page::from(b - b'0')).collect())
        .parse_next(input)
}
