//! Function-signature registry.
//!
//! A registry maps 4 byte selectors to canonical signatures. The static
//! catalogues below are built on first use and are read-only afterwards,
//! so lookups from many threads need no locking.

use std::collections::HashMap;

use alloy_json_abi::{parser::RootType, Function, Param};
use alloy_primitives::{keccak256, Selector};
use alloy_sol_types::SolCall;
use dao_sdk_std::{ensure, hex::bytes_to_hex};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::abi::{
    IAllowlistVoting, IERC1155, IERC20, IERC20Voting, IERC721, IGovernanceERC20, IMajorityVoting,
    IMembership, IMultisig, IPluginSetupProcessor, IDAO,
};
use crate::codec::selector_of;
use crate::error::ActionError;

/// A function known to a registry.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FunctionDescriptor {
    signature: String,
    name: String,
    selector: Selector,
}

impl FunctionDescriptor {
    /// Parses any human readable form of a signature, see [`normalize_signature`].
    pub fn parse(signature: &str) -> Result<Self, ActionError> {
        let function = parse_function(signature)?;

        Ok(Self {
            signature: function.signature(),
            selector: function.selector(),
            name: function.name,
        })
    }

    pub(crate) fn of<C: SolCall>() -> Self {
        Self::from_canonical(C::SIGNATURE.to_string())
    }

    fn from_canonical(signature: String) -> Self {
        let name = signature
            .split_once('(')
            .map_or(signature.as_str(), |(name, _)| name)
            .to_string();
        let selector = Selector::from_slice(&keccak256(signature.as_bytes())[..4]);

        Self {
            signature,
            name,
            selector,
        }
    }

    /// Canonical `name(type,...)` form.
    pub fn signature(&self) -> &str {
        &self.signature
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn selector(&self) -> Selector {
        self.selector
    }

    pub fn interface_params(&self) -> InterfaceParams {
        InterfaceParams {
            id: self.signature.clone(),
            function_name: self.name.clone(),
            hash: bytes_to_hex(self.selector.as_slice(), false),
        }
    }
}

/// What [`FunctionRegistry::find_interface`] reports about a payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterfaceParams {
    pub id: String,
    pub function_name: String,
    /// The selector as `0x` followed by 8 hex digits.
    pub hash: String,
}

#[derive(Clone, Debug, Default)]
pub struct FunctionRegistry {
    functions: Vec<FunctionDescriptor>,
    by_selector: HashMap<Selector, usize>,
}

impl FunctionRegistry {
    /// Builds a registry from human readable signatures.
    ///
    /// Repeated signatures are kept once. Two different signatures with the
    /// same selector are rejected since a payload could not tell them apart.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip_all))]
    pub fn new<I, S>(signatures: I) -> Result<Self, ActionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut registry = Self::default();
        for signature in signatures {
            registry.insert(FunctionDescriptor::parse(signature.as_ref())?)?;
        }

        Ok(registry)
    }

    fn from_known(descriptors: impl IntoIterator<Item = FunctionDescriptor>) -> Self {
        let mut registry = Self::default();
        for descriptor in descriptors {
            if let Err(_err) = registry.insert(descriptor) {
                warn!(err = %_err, "skipping function");
            }
        }

        registry
    }

    fn insert(&mut self, descriptor: FunctionDescriptor) -> Result<(), ActionError> {
        if let Some(&index) = self.by_selector.get(&descriptor.selector) {
            let known = &self.functions[index];
            ensure!(
                known.signature == descriptor.signature,
                ActionError::SelectorCollision {
                    selector: bytes_to_hex(descriptor.selector.as_slice(), false),
                    first: known.signature.clone(),
                    second: descriptor.signature,
                }
            );
            return Ok(());
        }

        self.by_selector
            .insert(descriptor.selector, self.functions.len());
        self.functions.push(descriptor);
        Ok(())
    }

    /// Functions in insertion order.
    pub fn functions(&self) -> &[FunctionDescriptor] {
        &self.functions
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    pub fn get(&self, selector: Selector) -> Option<&FunctionDescriptor> {
        self.by_selector
            .get(&selector)
            .map(|&index| &self.functions[index])
    }

    pub fn contains(&self, selector: Selector) -> bool {
        self.by_selector.contains_key(&selector)
    }

    /// Identifies the function a payload calls.
    ///
    /// Fails with [`ActionError::DataDecoding`] when the payload is shorter
    /// than a selector or the selector is unknown to this registry.
    pub fn get_function_fragment(&self, data: &[u8]) -> Result<&FunctionDescriptor, ActionError> {
        let selector = selector_of(data)?;

        self.get(selector).ok_or_else(|| {
            let selector = bytes_to_hex(selector.as_slice(), false);

            debug!(%selector, "unknown selector");

            ActionError::DataDecoding(format!("no known function has the selector {selector}"))
        })
    }

    /// Like [`Self::get_function_fragment`] but reports a miss as `None`.
    pub fn find_interface(&self, data: &[u8]) -> Option<InterfaceParams> {
        self.get_function_fragment(data)
            .ok()
            .map(FunctionDescriptor::interface_params)
    }
}

macro_rules! descriptors {
    ($($call:ty),* $(,)?) => {
        vec![$(FunctionDescriptor::of::<$call>()),*]
    };
}

fn dao_functions() -> Vec<FunctionDescriptor> {
    descriptors![
        IDAO::grantCall,
        IDAO::grantWithConditionCall,
        IDAO::revokeCall,
        IDAO::setMetadataCall,
        IDAO::setDaoURICall,
        IDAO::registerStandardCallbackCall,
        IDAO::setSignatureValidatorCall,
        IDAO::upgradeToCall,
        IDAO::upgradeToAndCallCall,
        IDAO::initializeFromCall,
        IDAO::withdrawCall,
    ]
}

fn token_transfer_functions() -> Vec<FunctionDescriptor> {
    descriptors![
        IERC20::transferCall,
        IERC721::safeTransferFromCall,
        IERC1155::safeTransferFromCall,
        IERC1155::safeBatchTransferFromCall,
    ]
}

fn token_voting_functions() -> Vec<FunctionDescriptor> {
    descriptors![IMajorityVoting::updateVotingSettingsCall, IGovernanceERC20::mintCall]
}

fn addresslist_voting_functions() -> Vec<FunctionDescriptor> {
    descriptors![
        IMajorityVoting::updateVotingSettingsCall,
        IMembership::addAddressesCall,
        IMembership::removeAddressesCall,
    ]
}

fn multisig_functions() -> Vec<FunctionDescriptor> {
    descriptors![
        IMembership::addAddressesCall,
        IMembership::removeAddressesCall,
        IMultisig::updateMultisigSettingsCall,
    ]
}

fn legacy_erc20_voting_functions() -> Vec<FunctionDescriptor> {
    descriptors![
        IERC20Voting::changeVoteConfigCall,
        IAllowlistVoting::addAllowedUsersCall,
        IAllowlistVoting::removeAllowedUsersCall,
    ]
}

fn plugin_setup_processor_functions() -> Vec<FunctionDescriptor> {
    descriptors![
        IPluginSetupProcessor::applyInstallationCall,
        IPluginSetupProcessor::applyUpdateCall,
        IPluginSetupProcessor::applyUninstallationCall,
    ]
}

pub static DAO: Lazy<FunctionRegistry> =
    Lazy::new(|| FunctionRegistry::from_known(dao_functions()));

pub static TOKEN_TRANSFERS: Lazy<FunctionRegistry> =
    Lazy::new(|| FunctionRegistry::from_known(token_transfer_functions()));

pub static TOKEN_VOTING: Lazy<FunctionRegistry> =
    Lazy::new(|| FunctionRegistry::from_known(token_voting_functions()));

pub static ADDRESSLIST_VOTING: Lazy<FunctionRegistry> =
    Lazy::new(|| FunctionRegistry::from_known(addresslist_voting_functions()));

pub static MULTISIG: Lazy<FunctionRegistry> =
    Lazy::new(|| FunctionRegistry::from_known(multisig_functions()));

pub static LEGACY_ERC20_VOTING: Lazy<FunctionRegistry> =
    Lazy::new(|| FunctionRegistry::from_known(legacy_erc20_voting_functions()));

pub static PLUGIN_SETUP_PROCESSOR: Lazy<FunctionRegistry> =
    Lazy::new(|| FunctionRegistry::from_known(plugin_setup_processor_functions()));

/// Every function the SDK knows how to decode.
pub static ALL: Lazy<FunctionRegistry> = Lazy::new(|| {
    FunctionRegistry::from_known(
        [
            dao_functions(),
            token_transfer_functions(),
            token_voting_functions(),
            addresslist_voting_functions(),
            multisig_functions(),
            legacy_erc20_voting_functions(),
            plugin_setup_processor_functions(),
        ]
        .into_iter()
        .flatten(),
    )
});

/// The signature behind `selector` if known, its hex form otherwise.
pub(crate) fn describe_selector(selector: Selector) -> String {
    ALL.get(selector).map_or_else(
        || bytes_to_hex(selector.as_slice(), false),
        |descriptor| descriptor.signature.clone(),
    )
}

/// Reduces a human readable signature to the canonical `name(type,...)` form.
///
/// Accepts an optional leading `function` keyword, parameter names, data
/// locations, `tuple(...)`, visibility, state mutability and a `returns`
/// list. `uint` and `int` expand to `uint256` and `int256`.
pub fn normalize_signature(signature: &str) -> Result<String, ActionError> {
    parse_function(signature).map(|function| function.signature())
}

fn parse_function(signature: &str) -> Result<Function, ActionError> {
    let invalid = || ActionError::InvalidSignature(signature.to_string());

    let function = Function::parse(signature.trim()).map_err(|_err| {
        debug!(err = %_err, signature, "unparsable signature");
        invalid()
    })?;

    // names are read with the type grammar, so `uint(...)` or `function(...)` get through
    ensure!(
        RootType::parse(&function.name).is_ok_and(|name| name.try_basic_solidity().is_err()),
        invalid()
    );
    ensure!(function.inputs.iter().all(is_abi_type), invalid());

    Ok(function)
}

/// Rejects user defined type names, which have no ABI encoding of their own.
fn is_abi_type(param: &Param) -> bool {
    let root = param.ty.split_once('[').map_or(param.ty.as_str(), |(root, _)| root);

    if root == "tuple" {
        !param.components.is_empty() && param.components.iter().all(is_abi_type)
    } else {
        param.components.is_empty()
            && RootType::parse(root).is_ok_and(|root| root.try_basic_solidity().is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dao_sdk_std::{assert_err, assert_ok, assert_some};
    use hex_literal::hex;

    #[test]
    fn normalizes_human_readable_signatures() {
        let cases = [
            ("changeVoteConfig(uint64,uint64,uint64)", "changeVoteConfig(uint64,uint64,uint64)"),
            (
                "function changeVoteConfig(uint64 _participationRequiredPct, uint64 _supportRequiredPct, uint64 _minDuration)",
                "changeVoteConfig(uint64,uint64,uint64)",
            ),
            (
                "  transfer( address to, uint amount ) external returns (bool)  ",
                "transfer(address,uint256)",
            ),
            ("setMetadata(bytes calldata _metadata)", "setMetadata(bytes)"),
            ("addAddresses(address[] memory _members)", "addAddresses(address[])"),
            ("initializeFrom(uint8[3] calldata _v, bytes _data)", "initializeFrom(uint8[3],bytes)"),
            (
                "function updateVotingSettings(tuple(uint8, uint32, uint32, uint64, uint) _votingSettings) external",
                "updateVotingSettings((uint8,uint32,uint32,uint64,uint256))",
            ),
            ("updateMultisigSettings((bool,uint16))", "updateMultisigSettings((bool,uint16))"),
            ("batch((address,bytes1)[2][] calls)", "batch((address,bytes1)[2][])"),
            ("function quote(uint amount) external view returns (uint)", "quote(uint256)"),
            ("pause()", "pause()"),
            ("functionCall(int x)", "functionCall(int256)"),
        ];

        for (input, expected) in cases {
            assert_eq!(assert_ok!(normalize_signature(input)), expected, "{input}");
        }
    }

    #[test]
    fn rejects_malformed_signatures() {
        for input in [
            "",
            "transfer",
            "(address)",
            "1transfer(address)",
            "transfer(address",
            "transfer(uint7)",
            "transfer(uint8[0])",
            "transfer(Token token)",
            "transfer(())",
            "function(uint)",
            "uint(address)",
            "transfer(bytes33)",
            "transfer(address[x])",
            "trans fer(address)",
        ] {
            assert!(normalize_signature(input).is_err(), "{input}");
        }
    }

    #[test]
    fn signature_forms_share_a_selector() {
        let compact = assert_ok!(FunctionDescriptor::parse("mint(address,uint256)"));
        let verbose = assert_ok!(FunctionDescriptor::parse(
            "function mint(address to, uint amount) external"
        ));

        assert_eq!(compact, verbose);
        assert_eq!(compact.name(), "mint");
        assert_eq!(compact.selector(), Selector::from(hex!("40c10f19")));
    }

    #[test]
    fn static_catalogues_match_known_selectors() {
        let expected: &[(&str, [u8; 4])] = &[
            ("grant(address,address,bytes32)", hex!("d68bad2c")),
            ("revoke(address,address,bytes32)", hex!("d96054c4")),
            ("grantWithCondition(address,address,bytes32,address)", hex!("c9dbc2a4")),
            ("setMetadata(bytes)", hex!("ee57e36f")),
            ("setDaoURI(string)", hex!("1080f99b")),
            ("registerStandardCallback(bytes4,bytes4,bytes4)", hex!("c4a50145")),
            ("setSignatureValidator(address)", hex!("3e2ab0d9")),
            ("upgradeTo(address)", hex!("3659cfe6")),
            ("upgradeToAndCall(address,bytes)", hex!("4f1ef286")),
            ("initializeFrom(uint8[3],bytes)", hex!("42d8e99e")),
            ("withdraw(address,address,uint256,string)", hex!("4f065632")),
            ("transfer(address,uint256)", hex!("a9059cbb")),
            ("safeTransferFrom(address,address,uint256)", hex!("42842e0e")),
            ("safeTransferFrom(address,address,uint256,uint256,bytes)", hex!("f242432a")),
            ("safeBatchTransferFrom(address,address,uint256[],uint256[],bytes)", hex!("2eb2c2d6")),
            ("updateVotingSettings((uint8,uint32,uint32,uint64,uint256))", hex!("0dfb278e")),
            ("mint(address,uint256)", hex!("40c10f19")),
            ("addAddresses(address[])", hex!("3628731c")),
            ("removeAddresses(address[])", hex!("a84eb999")),
            ("updateMultisigSettings((bool,uint16))", hex!("303f4336")),
            ("changeVoteConfig(uint64,uint64,uint64)", hex!("634fe2fb")),
            ("addAllowedUsers(address[])", hex!("49e61d37")),
            ("removeAllowedUsers(address[])", hex!("28471eff")),
            (
                "applyInstallation(address,(((uint8,uint16),address),address,(uint8,address,address,address,bytes32)[],bytes32))",
                hex!("fe6c3474"),
            ),
            (
                "applyUpdate(address,(address,((uint8,uint16),address),bytes,(uint8,address,address,address,bytes32)[],bytes32))",
                hex!("22e12c63"),
            ),
            (
                "applyUninstallation(address,(address,((uint8,uint16),address),(uint8,address,address,address,bytes32)[]))",
                hex!("851d11f8"),
            ),
        ];

        assert_eq!(ALL.len(), expected.len());
        for (signature, selector) in expected {
            let descriptor = assert_some!(ALL.get(Selector::from(*selector)));
            assert_eq!(descriptor.signature(), *signature);
        }
    }

    #[test]
    fn catalogues_are_complete() {
        assert_eq!(DAO.len(), 11);
        assert_eq!(TOKEN_TRANSFERS.len(), 4);
        assert_eq!(TOKEN_VOTING.len(), 2);
        assert_eq!(ADDRESSLIST_VOTING.len(), 3);
        assert_eq!(MULTISIG.len(), 3);
        assert_eq!(LEGACY_ERC20_VOTING.len(), 3);
        assert_eq!(PLUGIN_SETUP_PROCESSOR.len(), 3);
    }

    #[test]
    fn find_interface_reports_matches_and_misses() {
        let payload = hex!(
            "634fe2fb"
            "0000000000000000000000000000000000000000000000000000000000000019"
            "0000000000000000000000000000000000000000000000000000000000000033"
            "0000000000000000000000000000000000000000000000000000000000000e10"
        );

        let found = assert_some!(LEGACY_ERC20_VOTING.find_interface(&payload));
        assert_eq!(
            found,
            InterfaceParams {
                id: "changeVoteConfig(uint64,uint64,uint64)".into(),
                function_name: "changeVoteConfig".into(),
                hash: "0x634fe2fb".into(),
            }
        );

        let unknown = hex!(
            "0badf00d"
            "0000000000000000000000000000000000000000000000000000000000000001"
        );
        assert_eq!(LEGACY_ERC20_VOTING.find_interface(&unknown), None);
        assert_err!(
            LEGACY_ERC20_VOTING.get_function_fragment(&unknown),
            ActionError::DataDecoding("no known function has the selector 0x0badf00d".into())
        );

        // known elsewhere, but not to this catalogue
        assert_eq!(MULTISIG.find_interface(&payload), None);
        assert_eq!(LEGACY_ERC20_VOTING.find_interface(&[0x63, 0x4f]), None);
    }

    #[test]
    fn ad_hoc_registries() {
        let registry = assert_ok!(FunctionRegistry::new([
            "function transfer(address to, uint256 amount)",
            "transfer(address,uint256)",
            "approve(address spender, uint256 amount)",
        ]));

        assert_eq!(registry.len(), 2);
        assert!(registry.contains(Selector::from(hex!("a9059cbb"))));
        assert_eq!(
            assert_ok!(registry.get_function_fragment(&hex!("095ea7b3"))).signature(),
            "approve(address,uint256)"
        );

        assert!(matches!(
            FunctionRegistry::new(["transfer(address,uint256", "approve(address,uint256)"]),
            Err(ActionError::InvalidSignature(_))
        ));
        assert!(FunctionRegistry::new(Vec::<String>::new()).unwrap().is_empty());
    }

    #[test]
    fn colliding_signatures_are_rejected() {
        let mut registry = FunctionRegistry::default();
        assert_ok!(registry.insert(FunctionDescriptor::of::<IGovernanceERC20::mintCall>()));

        let impostor = FunctionDescriptor {
            signature: "mint2(address,uint256)".into(),
            name: "mint2".into(),
            selector: Selector::from(hex!("40c10f19")),
        };
        assert_err!(
            registry.insert(impostor),
            ActionError::SelectorCollision {
                selector: "0x40c10f19".into(),
                first: "mint(address,uint256)".into(),
                second: "mint2(address,uint256)".into(),
            }
        );
    }

    #[test]
    fn lookups_from_many_threads() {
        let payload = hex!("40c10f19");
        std::thread::scope(|scope| {
            for _ in 0..8 {
                scope.spawn(|| {
                    let found = assert_some!(ALL.find_interface(&payload));
                    assert_eq!(found.function_name, "mint");
                });
            }
        });
    }
}
