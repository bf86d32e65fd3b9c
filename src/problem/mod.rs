pub mod distance_matrix;

pub type Vertex = usize;

/// Extended real distance; [`UNREACHABLE`] marks a missing path.
pub type Distance = f64;

pub const UNREACHABLE: Distance = Distance::INFINITY;

#[derive(Debug, Clone, PartialEq)]
pub struct Arc {
    pub from: Vertex,
    pub to: Vertex,
    pub distance: Distance,
}

impl Arc {
    pub fn new(from: Vertex, to: Vertex, distance: Distance) -> Self {
        Self { from, to, distance }
    }
}

/// Walking speeds of the three contestants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpeedTriple {
    pub a: u32,
    pub b: u32,
    pub c: u32,
}

impl SpeedTriple {
    pub fn new(a: u32, b: u32, c: u32) -> Self {
        Self { a, b, c }
    }

    pub fn iter(&self) -> impl Iterator<Item = u32> {
        [self.a, self.b, self.c].into_iter()
    }

    #[inline(always)]
    pub fn slowest(&self) -> u32 {
        self.a.min(self.b).min(self.c)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slowest_is_the_minimum_regardless_of_position() {
        assert_eq!(SpeedTriple::new(50, 60, 70).slowest(), 50);
        assert_eq!(SpeedTriple::new(80, 55, 70).slowest(), 55);
        assert_eq!(SpeedTriple::new(80, 90, 61).slowest(), 61);
        assert_eq!(SpeedTriple::new(75, 75, 75).slowest(), 75);
    }
}
