use proptest::prelude::*;

use tessera_chain::{Chain, ChainOption};
use tessera_nullables::NullNode;

proptest! {
    /// Any identifier comes back from `id()` exactly as configured.
    #[test]
    fn id_roundtrip(id in ".*") {
        let chain: Chain<NullNode> = Chain::new([ChainOption::Id(id.clone())]);
        prop_assert_eq!(chain.id(), id.as_str());
    }

    /// The builder applies the same identifier.
    #[test]
    fn builder_id_roundtrip(id in "\\PC*") {
        let chain: Chain<NullNode> = Chain::builder().id(id.clone()).build();
        prop_assert_eq!(chain.id(), id.as_str());
    }
}
