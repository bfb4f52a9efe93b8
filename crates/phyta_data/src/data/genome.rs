use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::num::NonZeroU32;

/// What an organism does with its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Spend the turn keeping itself alive (vitality gain).
    Homeostasis,
    /// Spend the turn storing energy for reproduction.
    Invest,
}

impl Decision {
    /// Every value a decision gene can take.
    pub const ALL: [Decision; 2] = [Decision::Homeostasis, Decision::Invest];
}

/// A non-empty sequence that is read cyclically by turn index.
///
/// There is no way to build or shrink a `Cycle` down to zero elements,
/// deserialization included.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Cycle<T>(Vec<T>);

impl<T> Cycle<T> {
    /// Wraps `items`, or returns `None` when it is empty.
    #[must_use]
    pub fn new(items: Vec<T>) -> Option<Self> {
        if items.is_empty() {
            None
        } else {
            Some(Self(items))
        }
    }

    /// A cycle holding exactly one element.
    #[must_use]
    pub fn single(item: T) -> Self {
        Self(vec![item])
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with slices.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Element selected by `turn mod len`.
    #[must_use]
    pub fn at(&self, turn: u64) -> &T {
        let idx = (turn % self.0.len() as u64) as usize;
        &self.0[idx]
    }

    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.0
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.0.iter()
    }

    pub fn push(&mut self, item: T) {
        self.0.push(item);
    }

    /// Removes the last element unless it is the only one left.
    pub fn pop(&mut self) -> Option<T> {
        if self.0.len() > 1 {
            self.0.pop()
        } else {
            None
        }
    }

    /// Overwrites `idx`; returns `false` when `idx` is out of range.
    pub fn set(&mut self, idx: usize, item: T) -> bool {
        match self.0.get_mut(idx) {
            Some(slot) => {
                *slot = item;
                true
            }
            None => false,
        }
    }
}

impl<T: Serialize> Serialize for Cycle<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Cycle<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let items = Vec::<T>::deserialize(deserializer)?;
        Cycle::new(items).ok_or_else(|| D::Error::invalid_length(0, &"a non-empty sequence"))
    }
}

impl<'a, T> IntoIterator for &'a Cycle<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Display colour of an organism. Purely cosmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    /// Default plant colour, `#6abbd3`.
    pub const TEAL: Color = Color {
        r: 0x6a,
        g: 0xbb,
        b: 0xd3,
    };

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Encodes as `#rrggbb`.
    #[must_use]
    pub fn to_hex(&self) -> String {
        format!("#{}", hex::encode([self.r, self.g, self.b]))
    }

    /// Parses `#rrggbb` (leading `#` optional).
    pub fn from_hex(hex_str: &str) -> anyhow::Result<Self> {
        let digits = hex_str.trim_start_matches('#');
        let bytes = hex::decode(digits)?;
        anyhow::ensure!(
            bytes.len() == 3,
            "expected 3 colour channels, got {}",
            bytes.len()
        );
        Ok(Self::new(bytes[0], bytes[1], bytes[2]))
    }

    #[must_use]
    pub fn with_green(self, g: u8) -> Self {
        Self { g, ..self }
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::TEAL
    }
}

impl TryFrom<String> for Color {
    type Error = anyhow::Error;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_hex(&value)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

/// Heritable parameters of a plant.
///
/// Every offspring receives its own copy; sequences are owned, never shared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dna {
    longevity: NonZeroU32,
    decisions: Cycle<Decision>,
    reproductive_decisions: Cycle<u32>,
    #[serde(default)]
    color: Color,
}

impl Dna {
    /// Builds DNA from raw parts, rejecting a zero longevity or empty sequences.
    pub fn new(
        longevity: u32,
        decisions: Vec<Decision>,
        reproductive_decisions: Vec<u32>,
    ) -> anyhow::Result<Self> {
        let longevity = NonZeroU32::new(longevity)
            .ok_or_else(|| anyhow::anyhow!("longevity must be at least 1"))?;
        let decisions = Cycle::new(decisions)
            .ok_or_else(|| anyhow::anyhow!("decisions must not be empty"))?;
        let reproductive_decisions = Cycle::new(reproductive_decisions)
            .ok_or_else(|| anyhow::anyhow!("reproductive decisions must not be empty"))?;
        Ok(Self {
            longevity,
            decisions,
            reproductive_decisions,
            color: Color::TEAL,
        })
    }

    #[must_use]
    pub fn from_parts(
        longevity: NonZeroU32,
        decisions: Cycle<Decision>,
        reproductive_decisions: Cycle<u32>,
        color: Color,
    ) -> Self {
        Self {
            longevity,
            decisions,
            reproductive_decisions,
            color,
        }
    }

    #[must_use]
    pub fn with_color(mut self, color: Color) -> Self {
        self.color = color;
        self
    }

    #[must_use]
    pub fn longevity(&self) -> u32 {
        self.longevity.get()
    }

    pub fn set_longevity(&mut self, longevity: NonZeroU32) {
        self.longevity = longevity;
    }

    #[must_use]
    pub fn decisions(&self) -> &Cycle<Decision> {
        &self.decisions
    }

    pub fn decisions_mut(&mut self) -> &mut Cycle<Decision> {
        &mut self.decisions
    }

    #[must_use]
    pub fn reproductive_decisions(&self) -> &Cycle<u32> {
        &self.reproductive_decisions
    }

    pub fn reproductive_decisions_mut(&mut self) -> &mut Cycle<u32> {
        &mut self.reproductive_decisions
    }

    #[must_use]
    pub fn color(&self) -> Color {
        self.color
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    /// Serialize DNA to a hex string.
    #[must_use]
    pub fn to_hex(&self) -> String {
        let bytes = serde_json::to_vec(self).unwrap_or_default();
        hex::encode(bytes)
    }

    /// Deserialize DNA from a hex string.
    pub fn from_hex(hex_str: &str) -> anyhow::Result<Self> {
        let bytes = hex::decode(hex_str)?;
        let dna = serde_json::from_slice(&bytes)?;
        Ok(dna)
    }
}
