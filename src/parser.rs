use {
    crate::error::{Error, Result},
    glam::UVec2,
    image::Rgb,
    log::{debug, trace},
    nom::{
        branch::alt,
        bytes::complete::{tag, take_while1},
        character::complete::{anychar, char, digit1},
        combinator::{iterator, map, peek},
        sequence::{delimited, preceded, tuple},
        IResult,
    },
    std::fmt::{Debug, Formatter, Result as FmtResult},
};

const ESC: char = '\u{1b}';
const TRUECOLOR_FOREGROUND: &str = "\u{1b}[38;2;";

#[derive(Clone, Copy, PartialEq)]
pub struct Cell {
    /// `x` is the column, `y` is the row.
    pub pos: UVec2,
    pub color: Rgb<u8>,
    pub character: char,
}

impl Debug for Cell {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_fmt(format_args!(
            "({}, {}) #{:02X}{:02X}{:02X} {:?}",
            self.pos.x,
            self.pos.y,
            self.color.0[0],
            self.color.0[1],
            self.color.0[2],
            self.character,
        ))
    }
}

#[cfg_attr(test, derive(Debug, PartialEq))]
struct RawCell<'s> {
    channels: [&'s str; 3_usize],
    character: char,
}

#[cfg_attr(test, derive(Debug, PartialEq))]
enum Token<'s> {
    Cell(RawCell<'s>),
    Skipped(&'s str),
}

/* A trailing ESC is taken as the cell's character without being consumed, so a sequence that */
/* directly follows another one still starts a cell of its own. */
fn parse_character(input: &str) -> IResult<&str, char> {
    alt((peek(char(ESC)), anychar))(input)
}

fn parse_raw_cell(input: &str) -> IResult<&str, RawCell<'_>> {
    map(
        tuple((
            preceded(tag(TRUECOLOR_FOREGROUND), digit1),
            preceded(tag(";"), digit1),
            delimited(tag(";"), digit1, tag("m")),
            parse_character,
        )),
        |(r, g, b, character)| RawCell {
            channels: [r, g, b],
            character,
        },
    )(input)
}

fn parse_token(input: &str) -> IResult<&str, Token<'_>> {
    alt((
        map(parse_raw_cell, Token::Cell),
        map(take_while1(|c: char| c != ESC), Token::Skipped),
        map(tag("\u{1b}"), Token::Skipped),
    ))(input)
}

/// Parses the cells of a single line. `line_index` is zero-based and only used for positions and
/// error reporting.
pub fn parse_line(line: &str, line_index: usize) -> Result<Vec<Cell>> {
    let mut cells: Vec<Cell> = Vec::new();
    let mut tokens = iterator(line, parse_token);

    for token in &mut tokens {
        let raw_cell: RawCell = match token {
            Token::Cell(raw_cell) => raw_cell,
            Token::Skipped(text) => {
                trace!("line {}: skipped {text:?}", line_index + 1_usize);

                continue;
            }
        };

        let column: usize = cells.len();
        let mut color: Rgb<u8> = Rgb([0_u8; 3_usize]);

        for (channel, digits) in color.0.iter_mut().zip(raw_cell.channels) {
            *channel = digits
                .parse::<u8>()
                .map_err(|_| Error::InvalidColorChannel {
                    line: line_index + 1_usize,
                    column,
                    value: digits.into(),
                })?;
        }

        cells.push(Cell {
            pos: UVec2::new(column as u32, line_index as u32),
            color,
            character: raw_cell.character,
        });
    }

    Ok(cells)
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<Cell>>,
}

impl Grid {
    pub fn parse<S: AsRef<str>>(lines: &[S]) -> Result<Self> {
        let rows: Vec<Vec<Cell>> = lines
            .iter()
            .enumerate()
            .map(|(line_index, line)| parse_line(line.as_ref(), line_index))
            .collect::<Result<_>>()?;
        let grid: Self = Self { rows };

        debug!(
            "parsed {} cells into a {}x{} grid",
            grid.cells().count(),
            grid.column_count(),
            grid.row_count()
        );

        Ok(grid)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// The length of the longest row, `0` for a grid with no cells.
    pub fn column_count(&self) -> usize {
        self.rows.iter().map(Vec::len).max().unwrap_or_default()
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        &self.rows
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> + '_ {
        self.rows.iter().flatten()
    }

    pub fn ensure_not_empty(&self) -> Result<()> {
        if self.column_count() == 0_usize {
            Err(Error::EmptyInput {
                lines: self.row_count(),
            })
        } else {
            Ok(())
        }
    }
}
