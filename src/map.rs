use crate::brush::{Brush, Surface};
use crate::plane::Plane;
use rayon::prelude::*;
use std::collections::HashMap;
use tracing::warn;

/// Structural errors raised while parsing a `.map` source. Degenerate face planes are
/// not structural: those faces are dropped with a warning and parsing continues.
#[derive(Debug, Clone, thiserror::Error)]
pub enum MapError {
    #[error("unexpected end of input")]
    UnexpectedEof,
    #[error("expected a number, found `{0}`")]
    InvalidNumber(String),
}

/// A tokenizer for `.map` sources, reminiscent of `Com_Parse` in Quake's shared.c:
/// whitespace-separated tokens, `"` quoting, `//` line comments, and single-token
/// push-back for the optional trailing face fields.
struct Tokenizer<'a> {
    chars: std::str::Chars<'a>,
    pending: Option<String>,
}

impl<'a> Tokenizer<'a> {
    fn new(source: &'a str) -> Tokenizer<'a> {
        Tokenizer {
            chars: source.chars(),
            pending: None,
        }
    }

    fn next_token(&mut self) -> Option<String> {
        if let Some(token) = self.pending.take() {
            return Some(token);
        }

        let mut token = String::new();
        let mut comment = false;
        let mut quote = false;

        for c in self.chars.by_ref() {
            if comment {
                if c == '\n' {
                    comment = false;
                    token.clear();
                }
            } else if c == '"' {
                if quote {
                    return Some(token);
                }
                quote = true;
            } else if c.is_whitespace() && !quote {
                if !token.is_empty() {
                    return Some(token);
                }
            } else {
                token.push(c);
                if token == "//" && !quote {
                    comment = true;
                }
            }
        }

        if token.is_empty() { None } else { Some(token) }
    }

    /// Returns `token` from the next call to [`Tokenizer::next_token`].
    fn push_back(&mut self, token: String) {
        self.pending = Some(token);
    }

    fn expect_token(&mut self) -> Result<String, MapError> {
        self.next_token().ok_or(MapError::UnexpectedEof)
    }

    fn expect_f64(&mut self) -> Result<f64, MapError> {
        let token = self.expect_token()?;
        token.parse().map_err(|_| MapError::InvalidNumber(token))
    }
}

fn parse_i32(token: &str) -> Result<i32, MapError> {
    token
        .parse()
        .map_err(|_| MapError::InvalidNumber(token.to_string()))
}

fn parse_f64(token: &str) -> Result<f64, MapError> {
    token
        .parse()
        .map_err(|_| MapError::InvalidNumber(token.to_string()))
}

/// A key-value pair structure optionally encompassing one or more brushes. Worldspawn
/// is the first entity in any map and carries the bulk of the world geometry; point
/// entities (lights, spawns) have an origin instead.
#[derive(Debug, Clone, PartialEq)]
pub struct Entity {
    pairs: HashMap<String, String>,
    pub brushes: Vec<Brush>,
}

impl Default for Entity {
    fn default() -> Entity {
        Entity {
            pairs: HashMap::from([(String::from("classname"), String::from("unknown"))]),
            brushes: Vec::new(),
        }
    }
}

impl Entity {
    pub fn value(&self, key: &str) -> Option<&str> {
        self.pairs.get(key).map(String::as_str)
    }

    pub fn set_value(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.pairs.insert(key.into(), value.into());
    }

    pub fn classname(&self) -> &str {
        self.value("classname").unwrap_or("unknown")
    }

    /// The origin of this entity, iff it contains no brushes.
    pub fn origin(&self) -> Option<[f64; 3]> {
        if !self.brushes.is_empty() {
            return None;
        }

        let mut parts = self.value("origin")?.split_whitespace();
        let x = parts.next()?.parse().ok()?;
        let y = parts.next()?.parse().ok()?;
        let z = parts.next()?.parse().ok()?;
        Some([x, y, z])
    }
}

/// A parsed `.map` document: an ordered collection of entities.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Map {
    pub entities: Vec<Entity>,
}

impl Map {
    /// Parses a `.map` source into a document model. Brush geometry is not reduced
    /// here; call [`Map::reduce`] once the document is loaded.
    pub fn parse(source: &str) -> Result<Map, MapError> {
        let mut tokens = Tokenizer::new(source);
        let mut map = Map::default();

        while let Some(token) = tokens.next_token() {
            if token == "{" {
                map.entities.push(parse_entity(&mut tokens)?);
            } else if token == "}" {
                break;
            }
        }

        Ok(map)
    }

    /// The worldspawn entity, when the map has one.
    pub fn worldspawn(&self) -> Option<&Entity> {
        self.entities.first()
    }

    /// Reduces every brush in the map to its boundary representation. Brushes only
    /// read their own immutable plane sets, so the work is spread across brushes with
    /// a data-parallel map.
    pub fn reduce(&mut self) {
        for entity in &mut self.entities {
            entity.brushes.par_iter_mut().for_each(Brush::reduce);
        }
    }

    pub fn count_brushes(&self) -> usize {
        self.entities.iter().map(|entity| entity.brushes.len()).sum()
    }

    pub fn count_surfaces(&self) -> usize {
        self.entities
            .iter()
            .flat_map(|entity| &entity.brushes)
            .map(|brush| brush.surfaces.len())
            .sum()
    }
}

fn parse_entity(tokens: &mut Tokenizer<'_>) -> Result<Entity, MapError> {
    let mut entity = Entity::default();
    let mut key: Option<String> = None;

    while let Some(token) = tokens.next_token() {
        if token == "}" {
            break;
        }

        if token == "{" {
            entity.brushes.push(parse_brush(tokens)?);
        } else if let Some(key) = key.take() {
            entity.set_value(key, token);
        } else {
            key = Some(token);
        }
    }

    Ok(entity)
}

fn parse_brush(tokens: &mut Tokenizer<'_>) -> Result<Brush, MapError> {
    let mut brush = Brush::default();
    let mut points: Vec<[f64; 3]> = Vec::with_capacity(3);

    while let Some(token) = tokens.next_token() {
        if token == "}" {
            break;
        }

        if token != "(" {
            continue;
        }

        let x = tokens.expect_f64()?;
        let y = tokens.expect_f64()?;
        let z = tokens.expect_f64()?;
        points.push([x, y, z]);

        if points.len() < 3 {
            continue;
        }

        // Consume the closing ')' of the third point, then the face attributes. The
        // attributes are read before the plane is validated so a degenerate face
        // leaves the token stream in sync.
        tokens.expect_token()?;

        let texture = tokens.expect_token()?;
        let offset_s = tokens.expect_f64()?;
        let offset_t = tokens.expect_f64()?;
        let angle = tokens.expect_f64()?;
        let scale_s = tokens.expect_f64()?;
        let scale_t = tokens.expect_f64()?;

        // The remaining fields are optional.
        let mut contents = 0;
        let mut flags = 0;
        let mut value = 0.0;

        if let Some(token) = tokens.next_token() {
            if token == "(" || token == "}" {
                tokens.push_back(token);
            } else {
                contents = parse_i32(&token)?;

                if let Some(token) = tokens.next_token() {
                    if token == "(" || token == "}" {
                        tokens.push_back(token);
                    } else {
                        flags = parse_i32(&token)?;

                        if let Some(token) = tokens.next_token() {
                            if token == "(" || token == "}" {
                                tokens.push_back(token);
                            } else {
                                value = parse_f64(&token)?;
                            }
                        }
                    }
                }
            }
        }

        match Plane::from_points(points[0], points[1], points[2]) {
            Ok(plane) => {
                let mut surface = Surface::new(plane);
                surface.texture = texture;
                surface.offset_s = offset_s;
                surface.offset_t = offset_t;
                surface.angle = angle;
                surface.scale_s = scale_s;
                surface.scale_t = scale_t;
                surface.contents = contents;
                surface.flags = flags;
                surface.value = value;
                brush.surfaces.push(surface);
            }
            Err(err) => {
                warn!(%err, texture = %texture, "dropping degenerate brush face");
            }
        }

        points.clear();
    }

    Ok(brush)
}
