//! Data
//!
//! `Attribute` and `Instance`, the cells and rows of a labeled table.
use crate::errors::TreeError;
use crate::utils::parse_numeric;
use std::cmp::Ordering;
use std::fmt::{self, Display};
use std::hash::{Hash, Hasher};

/// A named value of one row.
///
/// Two attributes are equal when both their names and values are equal,
/// the `continuous` flag does not take part in the comparison.
#[derive(Clone, Debug)]
pub struct Attribute {
    name: String,
    value: String,
    continuous: bool,
}

impl Attribute {
    /// Create a categorical attribute.
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Attribute {
            name: name.into(),
            value: value.into(),
            continuous: false,
        }
    }

    /// Create an attribute whose value is a numeric threshold.
    pub fn continuous(name: impl Into<String>, value: impl Into<String>) -> Self {
        Attribute {
            name: name.into(),
            value: value.into(),
            continuous: true,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_continuous(&self) -> bool {
        self.continuous
    }

    pub fn set_value(&mut self, value: impl Into<String>) {
        self.value = value.into();
    }

    /// The value parsed as a number, if it is one.
    pub fn numeric_value(&self) -> Option<f64> {
        parse_numeric(&self.name, &self.value).ok()
    }

    /// Compare the numeric values of two attributes.
    /// Only defined when the names match and both values are numbers.
    pub fn compare_value(&self, other: &Attribute) -> Option<Ordering> {
        if self.name != other.name {
            return None;
        }
        let (a, b) = (self.numeric_value()?, other.numeric_value()?);
        a.partial_cmp(&b)
    }

    pub fn less_than(&self, other: &Attribute) -> Option<bool> {
        self.compare_value(other).map(|o| o == Ordering::Less)
    }

    pub fn greater_than(&self, other: &Attribute) -> Option<bool> {
        self.compare_value(other).map(|o| o == Ordering::Greater)
    }
}

impl PartialEq for Attribute {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.value == other.value
    }
}

impl Eq for Attribute {}

impl Hash for Attribute {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
        self.value.hash(state);
    }
}

impl Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}={}", self.name, self.value)
    }
}

/// One row of a dataset, attribute names are unique within an instance.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Instance {
    attributes: Vec<Attribute>,
}

impl Instance {
    /// Create an instance, failing if two attributes share a name.
    pub fn new(attributes: Vec<Attribute>) -> Result<Self, TreeError> {
        let mut instance = Instance {
            attributes: Vec::with_capacity(attributes.len()),
        };
        for attribute in attributes {
            instance.push(attribute)?;
        }
        Ok(instance)
    }

    /// Create an instance of categorical attributes from `(name, value)` pairs.
    pub fn from_pairs<N, V>(pairs: &[(N, V)]) -> Result<Self, TreeError>
    where
        N: AsRef<str>,
        V: AsRef<str>,
    {
        Instance::new(
            pairs
                .iter()
                .map(|(n, v)| Attribute::new(n.as_ref(), v.as_ref()))
                .collect(),
        )
    }

    pub fn push(&mut self, attribute: Attribute) -> Result<(), TreeError> {
        if self.get(attribute.name()).is_some() {
            return Err(TreeError::InvalidConfiguration(format!(
                "attribute {} appears more than once in an instance",
                attribute.name()
            )));
        }
        self.attributes.push(attribute);
        Ok(())
    }

    /// Lookup an attribute by name.
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Lookup the value of an attribute by name.
    pub fn value(&self, name: &str) -> Option<&str> {
        self.get(name).map(|a| a.value())
    }

    /// Rewrite the value of an attribute, returns false if it does not exist.
    pub fn set_value(&mut self, name: &str, value: impl Into<String>) -> bool {
        match self.attributes.iter_mut().find(|a| a.name == name) {
            Some(attribute) => {
                attribute.set_value(value);
                true
            }
            None => false,
        }
    }

    pub fn contains(&self, attribute: &Attribute) -> bool {
        self.get(attribute.name()).is_some_and(|a| a == attribute)
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|a| a.name())
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }
}

impl Display for Instance {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let cells: Vec<String> = self.attributes.iter().map(|a| a.to_string()).collect();
        write!(f, "{{{}}}", cells.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_attribute_equality_ignores_flag() {
        let a = Attribute::new("Elevation", "250");
        let b = Attribute::continuous("Elevation", "250");
        let c = Attribute::new("Elevation", "251");
        let d = Attribute::new("Slope", "250");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_ne!(a, d);
    }

    #[test]
    fn test_attribute_equality_laws() {
        let attrs = [
            Attribute::new("A", "sunny"),
            Attribute::new("A", "sunny"),
            Attribute::continuous("A", "sunny"),
            Attribute::new("A", "rainy"),
            Attribute::new("B", "sunny"),
        ];
        for x in attrs.iter() {
            assert_eq!(x, x);
            for y in attrs.iter() {
                assert_eq!(x == y, y == x);
                for z in attrs.iter() {
                    if x == y && y == z {
                        assert_eq!(x, z);
                    }
                }
            }
        }
    }

    #[test]
    fn test_attribute_ordering() {
        let low = Attribute::new("Elevation", "100");
        let high = Attribute::continuous("Elevation", "250.5");
        assert_eq!(low.less_than(&high), Some(true));
        assert_eq!(low.greater_than(&high), Some(false));
        assert_eq!(high.greater_than(&low), Some(true));
        assert_eq!(low.compare_value(&low), Some(Ordering::Equal));

        let other = Attribute::new("Slope", "300");
        assert_eq!(low.less_than(&other), None);
        let word = Attribute::new("Elevation", "high");
        assert_eq!(low.less_than(&word), None);
    }

    #[test]
    fn test_instance_lookup() {
        let mut instance = Instance::from_pairs(&[("A", "sunny"), ("Y", "no")]).unwrap();
        assert_eq!(instance.value("A"), Some("sunny"));
        assert_eq!(instance.value("B"), None);
        assert!(instance.contains(&Attribute::new("Y", "no")));
        assert!(!instance.contains(&Attribute::new("Y", "yes")));

        assert!(instance.set_value("A", "rainy"));
        assert!(!instance.set_value("B", "x"));
        assert_eq!(instance.value("A"), Some("rainy"));
        assert_eq!(instance.names().collect::<Vec<_>>(), vec!["A", "Y"]);
        assert_eq!(instance.to_string(), "{A=rainy, Y=no}");
    }

    #[test]
    fn test_instance_rejects_duplicates() {
        let result = Instance::from_pairs(&[("A", "sunny"), ("A", "rainy")]);
        assert!(matches!(result, Err(TreeError::InvalidConfiguration(_))));
    }
}
