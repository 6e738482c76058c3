//! Inter-symbology dependencies
//!
//! Some symbologies are only reported by the decoder while a structurally
//! related base symbology is enabled. UPC-A and the ISBN variants, for
//! instance, come out of the EAN-13 decoder and vanish when it is off.

use crate::symbol::{BarcodeType, SymbolType};

/// Base symbology paired with every symbology that requires it.
const DEPENDENCIES: &[(SymbolType, BarcodeType)] = &[(
    SymbolType::Ean13,
    BarcodeType::UPC_A
        .union(BarcodeType::ISBN_10)
        .union(BarcodeType::ISBN_13),
)];

const DEPENDENTS: [BarcodeType; SymbolType::COUNT] = dependents_table(DEPENDENCIES);
const REQUIREMENTS: [BarcodeType; SymbolType::COUNT] = requirements_table(DEPENDENCIES);

const fn dependents_table(
    table: &[(SymbolType, BarcodeType)],
) -> [BarcodeType; SymbolType::COUNT] {
    let mut out = [BarcodeType::empty(); SymbolType::COUNT];
    let mut i = 0;
    while i < table.len() {
        let (base, dependents) = table[i];
        out[base.index()] = out[base.index()].union(dependents);
        i += 1;
    }
    out
}

const fn requirements_table(
    table: &[(SymbolType, BarcodeType)],
) -> [BarcodeType; SymbolType::COUNT] {
    let mut out = [BarcodeType::empty(); SymbolType::COUNT];
    let mut i = 0;
    while i < table.len() {
        let (base, dependents) = table[i];
        let mut j = 0;
        while j < SymbolType::COUNT {
            let sym = SymbolType::ALL[j];
            if dependents.contains(sym.flag()) {
                out[j] = out[j].union(base.flag());
            }
            j += 1;
        }
        i += 1;
    }
    out
}

/// Symbologies that cannot be recognized unless `base` is enabled.
pub const fn dependents_of(base: SymbolType) -> BarcodeType {
    DEPENDENTS[base.index()]
}

/// Symbologies that must be enabled for `sym` to be recognized.
pub const fn requirements_of(sym: SymbolType) -> BarcodeType {
    REQUIREMENTS[sym.index()]
}

/// `types` plus everything they transitively require.
pub fn closure(types: BarcodeType) -> BarcodeType {
    let mut result = types;
    let mut pending: Vec<SymbolType> = types.symbol_types().collect();
    while let Some(sym) = pending.pop() {
        for base in requirements_of(sym).symbol_types() {
            if !result.has(base) {
                result |= base.flag();
                pending.push(base);
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upca_requires_ean13() {
        assert_eq!(requirements_of(SymbolType::Upca), BarcodeType::EAN_13);
        assert_eq!(requirements_of(SymbolType::Isbn13), BarcodeType::EAN_13);
        assert!(requirements_of(SymbolType::Ean13).is_empty());
        assert!(requirements_of(SymbolType::QrCode).is_empty());
    }

    #[test]
    fn test_dependents_inverse_of_requirements() {
        for base in SymbolType::ALL {
            for dependent in SymbolType::ALL {
                assert_eq!(
                    dependents_of(base).has(dependent),
                    requirements_of(dependent).has(base),
                    "{base} / {dependent}"
                );
            }
        }
    }

    #[test]
    fn test_closure() {
        assert_eq!(
            closure(BarcodeType::I25 | BarcodeType::UPC_A),
            BarcodeType::I25 | BarcodeType::UPC_A | BarcodeType::EAN_13
        );
        assert_eq!(closure(BarcodeType::QR_CODE), BarcodeType::QR_CODE);
        assert_eq!(closure(BarcodeType::ALL), BarcodeType::ALL);
    }

    #[test]
    fn test_table_is_acyclic() {
        // Depth-first walk over the requirement edges; revisiting a symbology
        // on the current path would mean a cycle.
        fn visit(sym: SymbolType, path: &mut Vec<SymbolType>) {
            assert!(!path.contains(&sym), "dependency cycle through {sym}: {path:?}");
            path.push(sym);
            for base in requirements_of(sym).symbol_types() {
                visit(base, path);
            }
            path.pop();
        }

        for sym in SymbolType::ALL {
            visit(sym, &mut Vec::new());
        }
    }

    #[test]
    fn test_no_self_dependency() {
        for sym in SymbolType::ALL {
            assert!(!requirements_of(sym).has(sym));
        }
    }
}
