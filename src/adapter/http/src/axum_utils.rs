// Copyright Kamu Data, Inc. and contributors. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

/// Resolves one or several components from the catalog. Handlers are only
/// mounted on servers that registered everything they use, so a missing
/// component is a wiring bug.
macro_rules! from_catalog_n {
    ($catalog:ident, $T:ty) => {
        $catalog.get_one::<$T>().unwrap()
    };
    ($catalog:ident, $T:ty, $($Ts:ty),+) => {
        (
            $catalog.get_one::<$T>().unwrap(),
            $( $catalog.get_one::<$Ts>().unwrap() ),+
        )
    };
}

pub(crate) use from_catalog_n;

////////////////////////////////////////////////////////////////////////////////////////////////////////////////////////
