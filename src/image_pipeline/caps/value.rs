use std::fmt;

/// A constraint on one caps field.
#[derive(Debug, Clone, PartialEq)]
pub enum CapsValue<T> {
    /// Exactly this value
    Fixed(T),
    /// Any value in `min..=max`
    Range { min: T, max: T },
    /// One of these values, most preferred first
    List(Vec<T>),
}

impl<T: Clone + PartialOrd> CapsValue<T> {
    pub fn range(min: T, max: T) -> Self {
        Self::Range { min, max }
    }

    pub fn list(values: impl IntoIterator<Item = T>) -> Self {
        Self::List(values.into_iter().collect())
    }

    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed(_))
    }

    /// The value, if this constraint admits exactly one.
    pub fn fixed(&self) -> Option<&T> {
        match self {
            Self::Fixed(v) => Some(v),
            _ => None,
        }
    }

    pub fn contains(&self, value: &T) -> bool {
        match self {
            Self::Fixed(v) => v == value,
            Self::Range { min, max } => min <= value && value <= max,
            Self::List(values) => values.contains(value),
        }
    }

    /// Values admitted by both constraints, or `None` if there are none.
    ///
    /// List results keep `self`'s ordering.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        match (self, other) {
            (Self::Fixed(v), other) => other.contains(v).then(|| Self::Fixed(v.clone())),
            (this, Self::Fixed(v)) => this.contains(v).then(|| Self::Fixed(v.clone())),

            (
                Self::Range { min: min1, max: max1 },
                Self::Range { min: min2, max: max2 },
            ) => {
                let lo = if min1 >= min2 { min1 } else { min2 };
                let hi = if max1 <= max2 { max1 } else { max2 };
                if lo > hi {
                    None
                } else if lo == hi {
                    Some(Self::Fixed(lo.clone()))
                } else {
                    Some(Self::Range { min: lo.clone(), max: hi.clone() })
                }
            }

            (Self::List(values), other) | (other, Self::List(values)) => {
                Self::collapse(values.iter().filter(|v| other.contains(v)).cloned().collect())
            }
        }
    }

    /// Pick a concrete value: the fixed value, the lower bound, or the first entry.
    pub fn fixate(&self) -> Option<T> {
        match self {
            Self::Fixed(v) => Some(v.clone()),
            Self::Range { min, .. } => Some(min.clone()),
            Self::List(values) => values.first().cloned(),
        }
    }

    fn collapse(mut values: Vec<T>) -> Option<Self> {
        match values.len() {
            0 => None,
            1 => values.pop().map(Self::Fixed),
            _ => Some(Self::List(values)),
        }
    }
}

impl<T: fmt::Display> fmt::Display for CapsValue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(v) => write!(f, "{v}"),
            Self::Range { min, max } => write!(f, "[ {min}, {max} ]"),
            Self::List(values) => {
                f.write_str("{ ")?;
                for (i, v) in values.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{v}")?;
                }
                f.write_str(" }")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_against_range_and_list() {
        let fixed = CapsValue::Fixed(640u32);
        assert_eq!(fixed.intersect(&CapsValue::range(1, 1920)), Some(CapsValue::Fixed(640)));
        assert_eq!(fixed.intersect(&CapsValue::range(1, 320)), None);
        assert_eq!(CapsValue::list([320, 640]).intersect(&fixed), Some(CapsValue::Fixed(640)));
        assert_eq!(fixed.intersect(&CapsValue::Fixed(641)), None);
    }

    #[test]
    fn range_overlap() {
        let a = CapsValue::range(1u32, 100);
        assert_eq!(a.intersect(&CapsValue::range(50, 200)), Some(CapsValue::range(50, 100)));
        assert_eq!(a.intersect(&CapsValue::range(100, 200)), Some(CapsValue::Fixed(100)));
        assert_eq!(a.intersect(&CapsValue::range(101, 200)), None);
    }

    #[test]
    fn list_intersection_keeps_left_order() {
        let preferred = CapsValue::list(["rggb", "bggr", "grbg"]);
        let offered = CapsValue::list(["bggr", "gbrg", "rggb"]);
        assert_eq!(preferred.intersect(&offered), Some(CapsValue::list(["rggb", "bggr"])));
        assert_eq!(offered.intersect(&preferred), Some(CapsValue::list(["bggr", "rggb"])));
    }

    #[test]
    fn fixate_picks_first_candidate() {
        assert_eq!(CapsValue::range(4u32, 8).fixate(), Some(4));
        assert_eq!(CapsValue::list(["grbg", "rggb"]).fixate(), Some("grbg"));
        assert_eq!(CapsValue::<u32>::List(Vec::new()).fixate(), None);
    }

    #[test]
    fn display_forms() {
        assert_eq!(CapsValue::Fixed(3u32).to_string(), "3");
        assert_eq!(CapsValue::range(1u32, 5).to_string(), "[ 1, 5 ]");
        assert_eq!(CapsValue::list(["bggr", "rggb"]).to_string(), "{ bggr, rggb }");
    }
}
