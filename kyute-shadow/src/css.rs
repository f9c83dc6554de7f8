//! CSS `box-shadow` parsing.
use crate::{Color, Error, ShadowParameters};
use cssparser::{ParseError, Parser, ParserInput, Token};
use std::f32::consts::PI;

pub(crate) fn parse_from_str<'i, T, F, E>(css: &'i str, f: F) -> Result<T, ParseError<'i, E>>
where
    F: for<'tt> FnOnce(&mut Parser<'i, 'tt>) -> Result<T, ParseError<'i, E>>,
{
    let mut input = ParserInput::new(css);
    let mut input = Parser::new(&mut input);
    input.parse_entirely(f)
}

fn syntax_error(err: ParseError<'_, ()>) -> Error {
    Error::Syntax {
        line: err.location.line,
        column: err.location.column,
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// lengths
////////////////////////////////////////////////////////////////////////////////////////////////////

/// Parses a length in DIPs.
fn length<'i>(input: &mut Parser<'i, '_>) -> Result<f64, ParseError<'i, ()>> {
    let location = input.current_source_location();
    match input.next()? {
        token @ Token::Dimension { value, unit, .. } => {
            // CSS px are DIPs
            match &*unit.to_ascii_lowercase() {
                "px" | "dp" | "dip" => Ok(*value as f64),
                _ => Err(location.new_unexpected_token_error(token.clone())),
            }
        }
        Token::Number { value, .. } if *value == 0.0 => Ok(0.0),
        token => Err(location.new_unexpected_token_error(token.clone())),
    }
}

fn non_negative_length<'i>(input: &mut Parser<'i, '_>) -> Result<f64, ParseError<'i, ()>> {
    let location = input.current_source_location();
    let value = length(input)?;
    if value < 0.0 {
        return Err(location.new_custom_error(()));
    }
    Ok(value)
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// colors
////////////////////////////////////////////////////////////////////////////////////////////////////

fn alpha<'i>(input: &mut Parser<'i, '_>, legacy: bool) -> Result<f32, ParseError<'i, ()>> {
    if input.is_exhausted() {
        return Ok(1.0);
    }
    if legacy {
        input.expect_comma()?;
    } else {
        input.expect_delim('/')?;
    }
    let location = input.current_source_location();
    let alpha = match input.next()? {
        Token::Number { value, .. } => *value,
        Token::Percentage { unit_value, .. } => *unit_value,
        t => return Err(location.new_unexpected_token_error(t.clone())),
    };
    Ok(alpha.clamp(0.0, 1.0))
}

fn rgb_channel<'i>(input: &mut Parser<'i, '_>, is_number: bool) -> Result<f32, ParseError<'i, ()>> {
    if is_number {
        Ok(input.expect_number()? / 255.0)
    } else {
        Ok(input.expect_percentage()?)
    }
}

fn rgb_color<'i>(input: &mut Parser<'i, '_>) -> Result<Color, ParseError<'i, ()>> {
    let location = input.current_source_location();
    let (r, is_number) = match input.next()? {
        Token::Number { value, .. } => (*value / 255.0, true),
        Token::Percentage { unit_value, .. } => (*unit_value, false),
        t => return Err(location.new_unexpected_token_error(t.clone())),
    };

    // `rgb(r, g, b)` or `rgb(r g b)`
    let legacy = input.try_parse(|input| input.expect_comma()).is_ok();
    let g = rgb_channel(input, is_number)?;
    if legacy {
        input.expect_comma()?;
    }
    let b = rgb_channel(input, is_number)?;

    let alpha = alpha(input, legacy)?;
    input.expect_exhausted()?;

    Ok(Color::new(r.clamp(0.0, 1.0), g.clamp(0.0, 1.0), b.clamp(0.0, 1.0), alpha))
}

fn hsl_color<'i>(input: &mut Parser<'i, '_>) -> Result<Color, ParseError<'i, ()>> {
    let location = input.current_source_location();
    let hue_degrees = match input.next()? {
        Token::Number { value, .. } => *value,
        Token::Dimension { value, unit, .. } => match &**unit {
            "deg" => *value,
            "grad" => *value * 360. / 400.,
            "rad" => *value * 360. / (2. * PI),
            "turn" => *value * 360.,
            _ => return Err(location.new_unexpected_token_error(Token::Ident(unit.clone()))),
        },
        t => return Err(location.new_unexpected_token_error(t.clone())),
    };

    let legacy = input.try_parse(|input| input.expect_comma()).is_ok();
    let saturation = input.expect_percentage()?;
    if legacy {
        input.expect_comma()?;
    }
    let lightness = input.expect_percentage()?;
    let alpha = alpha(input, legacy)?;
    input.expect_exhausted()?;
    Ok(Color::hsla(hue_degrees, saturation, lightness, alpha))
}

fn color_function<'i>(name: &str, input: &mut Parser<'i, '_>) -> Result<Color, ParseError<'i, ()>> {
    let location = input.current_source_location();
    match &*name.to_ascii_lowercase() {
        "rgb" | "rgba" => rgb_color(input),
        "hsl" | "hsla" => hsl_color(input),
        _ => Err(location.new_unexpected_token_error(Token::Ident(name.to_owned().into()))),
    }
}

fn named_color(name: &str) -> Option<Color> {
    // `currentcolor` has no meaning for a shadow drawn outside of a style context
    match cssparser::parse_color_keyword(name) {
        Ok(cssparser::Color::RGBA(rgba)) => Some(Color::from_rgba_u8(rgba.red, rgba.green, rgba.blue, rgba.alpha)),
        _ => None,
    }
}

/// Parses a CSS color.
pub(crate) fn css_color<'i>(input: &mut Parser<'i, '_>) -> Result<Color, ParseError<'i, ()>> {
    let location = input.current_source_location();
    match input.next()? {
        Token::Function(name) => {
            let name = name.clone();
            input.parse_nested_block(|input| color_function(&name, input))
        }
        t @ (Token::Hash(digits) | Token::IDHash(digits)) => match Color::try_from_hex(digits) {
            Ok(color) => Ok(color),
            Err(_) => Err(location.new_unexpected_token_error(t.clone())),
        },
        t @ Token::Ident(name) => match named_color(name) {
            Some(color) => Ok(color),
            None => Err(location.new_unexpected_token_error(t.clone())),
        },
        t => Err(location.new_unexpected_token_error(t.clone())),
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
// box-shadow declaration
////////////////////////////////////////////////////////////////////////////////////////////////////

/// Parses one shadow. Returns the parameters and whether the shadow is inset.
fn box_shadow<'i>(input: &mut Parser<'i, '_>) -> Result<(ShadowParameters, bool), ParseError<'i, ()>> {
    let mut inset = false;
    let mut lengths = None;
    let mut color = None;

    loop {
        if !inset && input.try_parse(|i| i.expect_ident_matching("inset")).is_ok() {
            inset = true;
            continue;
        }

        if lengths.is_none() {
            let values = input.try_parse::<_, _, ParseError<'i, ()>>(|input| {
                let offset_x = length(input)?;
                let offset_y = length(input)?;
                let blur = match input.try_parse(non_negative_length) {
                    Ok(blur) => blur,
                    Err(_) => {
                        // a negative blur is an error, not a missing blur
                        let location = input.current_source_location();
                        if input.try_parse(length).is_ok() {
                            return Err(location.new_custom_error(()));
                        }
                        0.0
                    }
                };
                let spread = input.try_parse(length).unwrap_or(0.0);
                Ok((offset_x, offset_y, blur, spread))
            });

            match values {
                Ok(values) => {
                    lengths = Some(values);
                    continue;
                }
                Err(err) if matches!(err.kind, cssparser::ParseErrorKind::Custom(())) => return Err(err),
                Err(_) => {}
            }
        }

        if color.is_none() {
            if let Ok(c) = input.try_parse(css_color) {
                color = Some(c);
                continue;
            }
        }

        break;
    }

    let Some((offset_x, offset_y, blur_radius, spread)) = lengths else {
        return Err(input.new_custom_error(()));
    };
    Ok((
        ShadowParameters::new(color.unwrap_or(Color::BLACK), offset_x, offset_y, blur_radius, spread),
        inset,
    ))
}

/// Parses a single outset shadow.
pub(crate) fn parse_box_shadow(css: &str) -> Result<ShadowParameters, Error> {
    let (params, inset) = parse_from_str(css, box_shadow).map_err(syntax_error)?;
    if inset {
        return Err(Error::InsetShadow);
    }
    Ok(params)
}

/// Parses a comma-separated list of outset shadows, or `none`.
pub(crate) fn parse_box_shadow_list(css: &str) -> Result<Vec<ShadowParameters>, Error> {
    if css.trim().eq_ignore_ascii_case("none") {
        return Ok(vec![]);
    }
    let shadows = parse_from_str(css, |input| input.parse_comma_separated(box_shadow)).map_err(syntax_error)?;
    shadows
        .into_iter()
        .map(|(params, inset)| if inset { Err(Error::InsetShadow) } else { Ok(params) })
        .collect()
}
