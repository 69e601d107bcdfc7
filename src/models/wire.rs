// config.json enum encoding: integer index as written, name accepted when hand-edited

use serde::Deserialize;
use serde::de::Error;

#[derive(Deserialize)]
#[serde(untagged)]
pub(super) enum EnumRepr {
    Index(u64),
    Name(String),
}

/// Look up `repr` in `(variant, name)` pairs. The index is the position in
/// `table`; names match case-insensitively.
pub(super) fn resolve_enum<T: Copy, E: Error>(
    repr: EnumRepr,
    table: &[(T, &str)],
) -> Result<T, E> {
    let found = match &repr {
        EnumRepr::Index(i) => usize::try_from(*i)
            .ok()
            .and_then(|i| table.get(i))
            .map(|(v, _)| *v),
        EnumRepr::Name(name) => table
            .iter()
            .find(|(_, n)| n.eq_ignore_ascii_case(name))
            .map(|(v, _)| *v),
    };
    found.ok_or_else(|| {
        let expected: Vec<&str> = table.iter().map(|(_, n)| *n).collect();
        match repr {
            EnumRepr::Index(i) => E::custom(format!(
                "unknown variant index {}, expected 0..{}",
                i,
                table.len()
            )),
            EnumRepr::Name(name) => E::custom(format!(
                "unknown variant `{}`, expected one of {:?}",
                name, expected
            )),
        }
    })
}
