//! Solidity ABI bindings for the token interface.

use alloy_sol_types::sol;

sol! {
    /// The subset of ERC-20 this crate encodes calls for.
    interface IERC20 {
        /// Move `amount` of the caller's tokens to `to`.
        function transfer(address to, uint256 amount) external returns (bool);
    }
}
