use crate::{
    confusion_matrix::ConfusionMatrix,
    purity_functions::{Entropy, Gini, Misclassification},
};
use serde::{Deserialize, Serialize};
use std::fmt::{self, Display};
use std::sync::Arc;

/// Impurity of the outcome given a split candidate, lower is better.
pub trait PurityFunction: Send + Sync {
    fn calculate(&self, matrix: &ConfusionMatrix) -> f64;
}

#[derive(Serialize, Deserialize, Clone, Default)]
pub enum Purity {
    #[default]
    Entropy,
    Gini,
    Misclassification,
    #[serde(skip)]
    Custom(Arc<dyn PurityFunction>),
}

impl Purity {
    pub fn new_custom<T>(purity_function: T) -> Self
    where
        T: PurityFunction + 'static,
    {
        Purity::Custom(Arc::new(purity_function))
    }
}

impl PurityFunction for Purity {
    fn calculate(&self, matrix: &ConfusionMatrix) -> f64 {
        match self {
            Purity::Entropy => Entropy::default().calculate(matrix),
            Purity::Gini => Gini::default().calculate(matrix),
            Purity::Misclassification => Misclassification::default().calculate(matrix),
            Purity::Custom(arc) => arc.calculate(matrix),
        }
    }
}

impl Display for Purity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Purity::Entropy => "Entropy",
            Purity::Gini => "Gini",
            Purity::Misclassification => "Misclassification",
            Purity::Custom(_) => "Custom",
        };
        write!(f, "{name}")
    }
}

impl fmt::Debug for Purity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Display::fmt(self, f)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::confusion_matrix::MissingPolicy;
    use crate::data::Instance;
    use crate::dataset::Dataset;

    fn mixed_matrix() -> ConfusionMatrix {
        let mut dataset = Dataset::new("Y");
        for (a, y) in [("sunny", "no"), ("sunny", "yes"), ("rainy", "yes"), ("rainy", "yes")] {
            dataset.push(Instance::from_pairs(&[("A", a), ("Y", y)]).unwrap());
        }
        ConfusionMatrix::build(&dataset, "A", "Y", MissingPolicy::Skip).unwrap()
    }

    struct RowCount;

    impl PurityFunction for RowCount {
        fn calculate(&self, matrix: &ConfusionMatrix) -> f64 {
            matrix.row_values().len() as f64
        }
    }

    #[test]
    fn test_dispatch() {
        let m = mixed_matrix();
        assert_eq!(Purity::Entropy.calculate(&m), 0.5);
        assert_eq!(Purity::Gini.calculate(&m), 0.25);
        assert_eq!(Purity::Misclassification.calculate(&m), 0.25);
        assert_eq!(Purity::new_custom(RowCount).calculate(&m), 2.0);
    }

    #[test]
    fn test_display_and_serde() {
        assert_eq!(Purity::default().to_string(), "Entropy");
        assert_eq!(Purity::new_custom(RowCount).to_string(), "Custom");
        let json = serde_json::to_string(&Purity::Gini).unwrap();
        assert_eq!(json, "\"Gini\"");
        let purity: Purity = serde_json::from_str("\"Misclassification\"").unwrap();
        assert_eq!(purity.to_string(), "Misclassification");
    }
}
