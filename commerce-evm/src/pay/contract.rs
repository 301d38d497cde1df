//! Solidity ABI surface of the payment pipeline.
//!
//! Three groups of definitions live here:
//!
//! - [`ITransfers`], the settlement contract that moves funds from the payer
//!   to the recipient (plus operator fee) under an operator-signed intent;
//! - the EIP-712 witness structs ([`PermitTransferFrom`], shared
//!   [`TokenPermissions`]) the payer signs off-chain for Permit2;
//! - the minimal [`IERC20`] read/write surface the engine needs.
//!
//! The signed `PermitTransferFrom` carries a `spender` field while the
//! call-side [`Permit`] does not: Permit2 injects `msg.sender` as the spender
//! when verifying, so the field exists only in the signed witness.

use alloy_sol_types::sol;

sol! {
    /// Operator-signed description of a single transfer: who gets paid, in
    /// what currency, how much, the operator fee, and a deadline.
    #[derive(Debug, PartialEq, Eq)]
    struct TransferIntent {
        uint256 recipientAmount;
        uint256 deadline;
        address recipient;
        address recipientCurrency;
        address refundDestination;
        uint256 feeAmount;
        bytes16 id;
        address operator;
        bytes signature;
        bytes prefix;
    }

    /// A token and the maximum amount the permit covers.
    #[derive(Debug, PartialEq, Eq)]
    struct TokenPermissions {
        address token;
        uint256 amount;
    }

    /// Call-side Permit2 permit. No `spender`: Permit2 derives it from the
    /// caller, which here is the settlement contract.
    #[derive(Debug, PartialEq, Eq)]
    struct Permit {
        TokenPermissions permitted;
        uint256 nonce;
        uint256 deadline;
    }

    /// Where the permitted funds go and how much of the permit to draw.
    #[derive(Debug, PartialEq, Eq)]
    struct SignatureTransferDetails {
        address to;
        uint256 requestedAmount;
    }

    /// Permit, transfer details, and the payer's signature, bundled the way
    /// `transferToken` expects them.
    #[derive(Debug, PartialEq, Eq)]
    struct Permit2SignatureTransferData {
        Permit permit;
        SignatureTransferDetails transferDetails;
        bytes signature;
    }

    /// The Commerce settlement contract.
    interface ITransfers {
        function transferToken(
            TransferIntent calldata intent,
            Permit2SignatureTransferData calldata signatureTransferData
        ) external;

        function transferNative(TransferIntent calldata intent) external payable;

        function swapAndTransferUniswapV3Native(
            TransferIntent calldata intent,
            uint24 poolFeesTier
        ) external payable;

        function swapAndTransferUniswapV3Token(
            TransferIntent calldata intent,
            Permit2SignatureTransferData calldata signatureTransferData,
            uint24 poolFeesTier
        ) external;
    }
}

sol! {
    /// EIP-712 witness the payer signs for Permit2's `permitTransferFrom`.
    /// Unlike the call-side [`Permit`], this one names the spender explicitly.
    #[derive(Debug, PartialEq, Eq)]
    struct PermitTransferFrom {
        TokenPermissions permitted;
        address spender;
        uint256 nonce;
        uint256 deadline;
    }
}

sol! {
    /// ERC-20 methods the engine reads and writes.
    interface IERC20 {
        function balanceOf(address account) external view returns (uint256);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }
}

sol! {
    /// Payload layout of an ERC-6492 wrapped signature: the wrapper is the
    /// ABI encoding of these three values followed by the magic suffix.
    #[derive(Debug, PartialEq, Eq)]
    struct Sig6492 {
        address factory;
        bytes factoryCalldata;
        bytes innerSig;
    }
}
