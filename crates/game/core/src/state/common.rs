use std::cmp::Ordering;
use std::fmt;

/// Unique identifier for any actor tracked by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntityId(pub u32);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Side an actor fights for. Actors on different teams are hostile to each other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeamId(pub u8);

impl TeamId {
    #[inline]
    pub fn is_hostile_to(self, other: TeamId) -> bool {
        self != other
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "team-{}", self.0)
    }
}

/// Discrete grid position expressed in tile coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Sum of axis deltas. Used for every distance tier in scoring.
    #[inline]
    pub fn manhattan_distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    /// Largest axis delta. Used for reach and area checks.
    #[inline]
    pub fn chebyshev_distance(self, other: Position) -> u32 {
        self.x.abs_diff(other.x).max(self.y.abs_diff(other.y))
    }

    #[inline]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Orthogonal neighbours in a fixed order (north, east, south, west).
    pub fn neighbors(self) -> [Position; 4] {
        [
            self.offset(0, -1),
            self.offset(1, 0),
            self.offset(0, 1),
            self.offset(-1, 0),
        ]
    }

    /// Every position inside the square of `radius` around `self`, row-major.
    pub fn square(self, radius: u32) -> impl Iterator<Item = Position> {
        let r = radius as i32;
        (-r..=r).flat_map(move |dy| (-r..=r).map(move |dx| self.offset(dx, dy)))
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Integer resource meter (e.g., health, movement) tracked per actor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResourceMeter {
    pub current: u32,
    pub maximum: u32,
}

impl ResourceMeter {
    pub fn new(current: u32, maximum: u32) -> Self {
        Self { current, maximum }
    }

    pub fn full(maximum: u32) -> Self {
        Self::new(maximum, maximum)
    }

    /// Compares the exact fill ratio against `numerator / denominator`.
    ///
    /// A zero maximum counts as empty. Computed in u64, so any u32 meter
    /// compares without rounding or overflow.
    pub fn ratio_cmp(&self, numerator: u32, denominator: u32) -> Ordering {
        if self.maximum == 0 {
            return 0.cmp(&numerator);
        }
        let current = u64::from(self.current.min(self.maximum));
        (current * u64::from(denominator)).cmp(&(u64::from(numerator) * u64::from(self.maximum)))
    }

    pub fn is_empty(&self) -> bool {
        self.current == 0
    }

    /// Removes up to `amount`, returning how much was actually removed.
    pub fn drain(&mut self, amount: u32) -> u32 {
        let removed = amount.min(self.current);
        self.current -= removed;
        removed
    }

    /// Adds `amount` on top of the current value. Not capped by `maximum`
    /// (dash-style bonuses last until the next refresh).
    pub fn grant(&mut self, amount: u32) {
        self.current = self.current.saturating_add(amount);
    }

    pub fn refill(&mut self) {
        self.current = self.maximum;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn distances() {
        let a = Position::new(5, 5);
        let b = Position::new(6, 8);
        assert_eq!(a.manhattan_distance(b), 4);
        assert_eq!(a.chebyshev_distance(b), 3);
    }

    #[test]
    fn square_is_row_major() {
        let cells: Vec<_> = Position::new(1, 1).square(1).collect();
        assert_eq!(cells.len(), 9);
        assert_eq!(cells[0], Position::new(0, 0));
        assert_eq!(cells[1], Position::new(1, 0));
        assert_eq!(cells[8], Position::new(2, 2));
    }

    #[test]
    fn meter_ratio_and_drain() {
        let mut hp = ResourceMeter::full(40);
        assert_eq!(hp.ratio_cmp(1, 1), Ordering::Equal);
        assert_eq!(hp.drain(30), 30);
        assert_eq!(hp.ratio_cmp(1, 4), Ordering::Equal);
        assert_eq!(hp.drain(30), 10);
        assert!(hp.is_empty());
        assert_eq!(ResourceMeter::new(0, 0).ratio_cmp(1, 2), Ordering::Less);
    }

    #[test]
    fn meter_ratio_is_exact() {
        assert_eq!(ResourceMeter::new(151, 200).ratio_cmp(3, 4), Ordering::Greater);
        assert_eq!(ResourceMeter::new(51, 200).ratio_cmp(1, 4), Ordering::Greater);
        assert_eq!(ResourceMeter::new(50, 200).ratio_cmp(1, 4), Ordering::Equal);

        let huge = ResourceMeter::new(u32::MAX - 1, u32::MAX);
        assert_eq!(huge.ratio_cmp(1, 1), Ordering::Less);
        assert_eq!(huge.ratio_cmp(3, 4), Ordering::Greater);
    }
}
