//! Character-map levels.
use crate::{GridError, Object, ObjectKind};
use gridcheck_core::Location;
use std::str::FromStr;

/// The default level, a small Sokoban puzzle with three boxes.
pub const SOKOBAN_LEVEL: &str = "\
wwwwwww
w..hA.w
w.whw.w
w...b.w
whbb.ww
w..wwww
wwwwwww";

/// Initial placement of objects.
#[derive(Debug, Clone, PartialEq)]
pub struct Level {
    width: u32,
    height: u32,
    objects: Vec<(Location, Object)>,
}

impl Level {
    /// Width of the level.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height of the level.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Objects in row-major order of the map.
    pub fn objects(&self) -> impl Iterator<Item = &(Location, Object)> {
        self.objects.iter()
    }
}

fn object(ch: char) -> Option<Option<Object>> {
    let (kind, player_id) = match ch {
        '.' => return Some(None),
        'w' => (ObjectKind::Wall, 0),
        'A' => (ObjectKind::Avatar, 1),
        'b' => (ObjectKind::Box, 0),
        'h' => (ObjectKind::Hole, 0),
        _ => return None,
    };
    Some(Some(Object { kind, player_id }))
}

impl FromStr for Level {
    type Err = GridError;

    /// Parses a map, one line per row. Blank lines and surrounding
    /// whitespace are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let rows = s
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .collect::<Vec<_>>();
        let width = match rows.first() {
            Some(row) => row.chars().count(),
            None => return Err(GridError::EmptyLevel),
        };

        let mut objects = Vec::new();
        for (y, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(GridError::RaggedRow {
                    y,
                    expected: width,
                    found,
                });
            }
            for (x, ch) in row.chars().enumerate() {
                match object(ch) {
                    Some(Some(obj)) => objects.push((Location::new(x as i32, y as i32), obj)),
                    Some(None) => {}
                    None => return Err(GridError::UnknownCharacter { ch, x, y }),
                }
            }
        }

        Ok(Self {
            width: width as u32,
            height: rows.len() as u32,
            objects,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_sokoban_level() {
        let level = Level::from_str(SOKOBAN_LEVEL).unwrap();
        assert_eq!((level.width(), level.height()), (7, 7));

        let count = |kind| level.objects().filter(|(_, o)| o.kind == kind).count();
        assert_eq!(count(ObjectKind::Avatar), 1);
        assert_eq!(count(ObjectKind::Box), 3);
        assert_eq!(count(ObjectKind::Hole), 3);

        let (loc, _) = level
            .objects()
            .find(|(_, o)| o.kind == ObjectKind::Avatar)
            .unwrap();
        assert_eq!(*loc, Location::new(4, 1));
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(Level::from_str("\n  \n"), Err(GridError::EmptyLevel));
        assert_eq!(
            Level::from_str("www\nww"),
            Err(GridError::RaggedRow {
                y: 1,
                expected: 3,
                found: 2
            })
        );
        assert_eq!(
            Level::from_str("w.w\nwxw"),
            Err(GridError::UnknownCharacter { ch: 'x', x: 1, y: 1 })
        );
    }
}
