//! Solidity interfaces of the contracts the dApp calls.

// The sol! macro generates items we can't document individually.
#![allow(missing_docs)]

use alloy_sol_types::sol;

sol! {
    /// ERC-721 with the enumerable extension; both NFT collections implement it.
    #[derive(Debug, PartialEq, Eq)]
    interface IERC721Enumerable {
        function balanceOf(address owner) external view returns (uint256 balance);
        function tokenOfOwnerByIndex(address owner, uint256 index) external view returns (uint256 tokenId);
        function setApprovalForAll(address operator, bool approved) external;
        function isApprovedForAll(address owner, address operator) external view returns (bool approved);
    }

    /// Staking contract. Pairs are staked 1:1, so both arrays must have the same length.
    #[derive(Debug, PartialEq, Eq)]
    interface IStaking {
        function stake(uint256[] craniumIds, uint256[] stallionIds) external;
    }
}
