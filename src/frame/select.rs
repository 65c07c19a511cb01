/// Things that can be turned into a list of column names for projection.
pub trait Selection<'a> {
    fn to_selection_vec(self) -> Vec<&'a str>;
}

impl<'a> Selection<'a> for &'a str {
    fn to_selection_vec(self) -> Vec<&'a str> {
        vec![self]
    }
}

impl<'a> Selection<'a> for &'a String {
    fn to_selection_vec(self) -> Vec<&'a str> {
        vec![self.as_str()]
    }
}

impl<'a> Selection<'a> for Vec<&'a str> {
    fn to_selection_vec(self) -> Vec<&'a str> {
        self
    }
}

impl<'a> Selection<'a> for &'a [&'a str] {
    fn to_selection_vec(self) -> Vec<&'a str> {
        self.to_vec()
    }
}

impl<'a, const N: usize> Selection<'a> for &'a [&'a str; N] {
    fn to_selection_vec(self) -> Vec<&'a str> {
        self.to_vec()
    }
}

impl<'a> Selection<'a> for &'a Vec<&'a str> {
    fn to_selection_vec(self) -> Vec<&'a str> {
        self.clone()
    }
}

#[cfg(test)]
mod test {
    use crate::prelude::*;

    #[test]
    fn selection_forms() {
        let df = df! {
            "a" => [1],
            "b" => [2]
        }
        .unwrap();
        assert_eq!(df.select("a").unwrap().width(), 1);
        assert_eq!(df.select(&["a", "b"]).unwrap().width(), 2);
        assert_eq!(df.select(vec!["b"]).unwrap().width(), 1);
    }
}
