//! Generated id templates.
//!
//! Templates use printf-style conversions, the notation hosts already use
//! for id settings (`mo_id_%d`, `f%06d`). Exactly one conversion consumes
//! the counter:
//!
//! ```text
//! %[flags][width][.precision][length]conversion
//!   flags       any of  - 0 + space #
//!   length      any of  h l L, accepted and ignored
//!   conversion  d i u (decimal), s r a (decimal text), x X (hex),
//!               o (octal), f F (fixed point)
//! ```
//!
//! `%%` is a literal percent sign. Width and precision are capped at
//! [`MAX_FIELD_WIDTH`]. A template is only checked when it is rendered, so
//! a bad one surfaces on first use.

use std::iter::Peekable;
use std::str::Chars;

/// Largest width or precision a conversion may ask for.
pub const MAX_FIELD_WIDTH: usize = 1024;

/// Why a template could not be rendered.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FormatError {
    /// No conversion consumes the counter.
    #[error("id format '{template}' has no integer placeholder")]
    MissingPlaceholder {
        /// The template as configured.
        template: String,
    },

    /// More than one conversion; only one value is available.
    #[error("id format '{template}' has more than one placeholder")]
    TooManyPlaceholders {
        /// The template as configured.
        template: String,
    },

    /// A conversion character that cannot format an integer.
    #[error("id format '{template}' uses unsupported conversion '%{conversion}'")]
    UnsupportedConversion {
        /// The template as configured.
        template: String,
        /// The offending conversion character.
        conversion: char,
    },

    /// A width or precision above [`MAX_FIELD_WIDTH`].
    #[error("id format '{template}' asks for a field wider than {}", MAX_FIELD_WIDTH)]
    WidthTooLarge {
        /// The template as configured.
        template: String,
    },

    /// The template ends in the middle of a conversion.
    #[error("id format '{template}' ends in an incomplete placeholder")]
    Incomplete {
        /// The template as configured.
        template: String,
    },
}

/// An id template such as `mo_id_%d`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdFormat {
    template: String,
}

impl IdFormat {
    /// Wrap a template. Nothing is validated until [`IdFormat::render`].
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
        }
    }

    /// The template as configured.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.template
    }

    /// Produce the id for counter value `n`.
    ///
    /// # Errors
    ///
    /// Returns a [`FormatError`] if the template does not hold exactly one
    /// supported integer conversion.
    pub fn render(&self, n: u64) -> Result<String, FormatError> {
        let mut out = String::with_capacity(self.template.len() + 8);
        let mut placeholders = 0;
        let mut chars = self.template.chars().peekable();

        while let Some(c) = chars.next() {
            if c != '%' {
                out.push(c);
                continue;
            }
            if chars.next_if_eq(&'%').is_some() {
                out.push('%');
                continue;
            }
            let spec = self.parse_spec(&mut chars)?;
            placeholders += 1;
            if placeholders > 1 {
                return Err(FormatError::TooManyPlaceholders {
                    template: self.template.clone(),
                });
            }
            spec.write(n, &mut out);
        }

        if placeholders == 0 {
            return Err(FormatError::MissingPlaceholder {
                template: self.template.clone(),
            });
        }
        Ok(out)
    }

    fn parse_spec(&self, chars: &mut Peekable<Chars<'_>>) -> Result<Spec, FormatError> {
        let mut spec = Spec::default();
        while let Some(flag) = chars.next_if(|c| matches!(*c, '-' | '0' | '+' | ' ' | '#')) {
            match flag {
                '-' => spec.left_align = true,
                '0' => spec.zero_pad = true,
                '+' => spec.plus_sign = true,
                ' ' => spec.space_sign = true,
                _ => spec.alternate = true,
            }
        }
        spec.width = take_number(chars);
        if chars.next_if_eq(&'.').is_some() {
            spec.precision = Some(take_number(chars));
        }
        if spec.width > MAX_FIELD_WIDTH || spec.precision.unwrap_or(0) > MAX_FIELD_WIDTH {
            return Err(FormatError::WidthTooLarge {
                template: self.template.clone(),
            });
        }
        while chars.next_if(|c| matches!(*c, 'h' | 'l' | 'L')).is_some() {}
        spec.conversion = match chars.next() {
            Some(c @ ('d' | 'i' | 'u' | 's' | 'r' | 'a' | 'x' | 'X' | 'o' | 'f' | 'F')) => c,
            Some(other) => {
                return Err(FormatError::UnsupportedConversion {
                    template: self.template.clone(),
                    conversion: other,
                });
            }
            None => {
                return Err(FormatError::Incomplete {
                    template: self.template.clone(),
                });
            }
        };
        Ok(spec)
    }
}

impl std::fmt::Display for IdFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.template)
    }
}

fn take_number(chars: &mut Peekable<Chars<'_>>) -> usize {
    let mut value = 0usize;
    while let Some(digit) = chars.next_if(char::is_ascii_digit) {
        let digit = digit.to_digit(10).map_or(0, |d| d as usize);
        value = value.saturating_mul(10).saturating_add(digit);
    }
    value
}

/// One parsed `%...` conversion.
#[derive(Debug, Default)]
struct Spec {
    left_align: bool,
    zero_pad: bool,
    plus_sign: bool,
    space_sign: bool,
    alternate: bool,
    width: usize,
    precision: Option<usize>,
    conversion: char,
}

impl Spec {
    fn write(&self, n: u64, out: &mut String) {
        let mut digits = match self.conversion {
            'x' => format!("{n:x}"),
            'X' => format!("{n:X}"),
            'o' => format!("{n:o}"),
            _ => n.to_string(),
        };

        let textual = matches!(self.conversion, 's' | 'r' | 'a');
        let (sign, prefix) = if textual {
            // The decimal text of n: precision truncates, signs and prefixes do not apply.
            if let Some(max) = self.precision {
                digits.truncate(max);
            }
            ("", "")
        } else {
            if matches!(self.conversion, 'f' | 'F') {
                let places = self.precision.unwrap_or(6);
                if places > 0 || self.alternate {
                    digits.push('.');
                }
                digits.push_str(&"0".repeat(places));
            } else if let Some(min) = self.precision
                && digits.len() < min
            {
                digits.insert_str(0, &"0".repeat(min - digits.len()));
            }
            let sign = if self.plus_sign {
                "+"
            } else if self.space_sign {
                " "
            } else {
                ""
            };
            let prefix = match (self.alternate, self.conversion) {
                (true, 'x') => "0x",
                (true, 'X') => "0X",
                (true, 'o') => "0o",
                _ => "",
            };
            (sign, prefix)
        };

        let len = sign.len() + prefix.len() + digits.len();
        let fill = self.width.saturating_sub(len);
        if self.left_align {
            out.push_str(sign);
            out.push_str(prefix);
            out.push_str(&digits);
            out.push_str(&" ".repeat(fill));
        } else if self.zero_pad && !textual {
            out.push_str(sign);
            out.push_str(prefix);
            out.push_str(&"0".repeat(fill));
            out.push_str(&digits);
        } else {
            out.push_str(&" ".repeat(fill));
            out.push_str(sign);
            out.push_str(prefix);
            out.push_str(&digits);
        }
    }
}
