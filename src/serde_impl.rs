use std::fmt::{Formatter, Result as FmtResult};
use std::marker::PhantomData;

use serde::de::{Deserialize, Deserializer, SeqAccess, Visitor};
use serde::ser::{Serialize, SerializeSeq, Serializer};

use crate::list::SkipList;

/// Serialized as the ascending sequence of values.
impl<T: Serialize> Serialize for SkipList<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(self.len()))?;
        for v in self.iter() {
            seq.serialize_element(v)?;
        }
        seq.end()
    }
}

struct SkipListVisitor<T>(PhantomData<T>);

impl<'de, T: Deserialize<'de> + Ord> Visitor<'de> for SkipListVisitor<T> {
    type Value = SkipList<T>;

    fn expecting(&self, f: &mut Formatter) -> FmtResult {
        write!(f, "a sequence of values")
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
        let mut list = SkipList::new();
        while let Some(v) = seq.next_element()? {
            list.insert(v);
        }
        Ok(list)
    }
}

/// Rebuilt by reinsertion, so any order is accepted and repeats collapse.
impl<'de, T: Deserialize<'de> + Ord> Deserialize<'de> for SkipList<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_seq(SkipListVisitor(PhantomData))
    }
}
