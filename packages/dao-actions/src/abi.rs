//! Solidity bindings for every function an action can call.

use alloy_sol_types::sol;

sol! {
    enum PermissionOperation {
        Grant,
        Revoke,
        GrantWithCondition,
    }

    struct VotingSettings {
        uint8 votingMode;
        uint32 supportThreshold;
        uint32 minParticipation;
        uint64 minDuration;
        uint256 minProposerVotingPower;
    }

    struct MultisigSettings {
        bool onlyListed;
        uint16 minApprovals;
    }

    struct Tag {
        uint8 release;
        uint16 build;
    }

    struct PluginSetupRef {
        Tag versionTag;
        address pluginSetupRepo;
    }

    struct MultiTargetPermission {
        PermissionOperation operation;
        address _where;
        address who;
        address condition;
        bytes32 permissionId;
    }

    struct ApplyInstallationParams {
        PluginSetupRef pluginSetupRef;
        address plugin;
        MultiTargetPermission[] permissions;
        bytes32 helpersHash;
    }

    struct ApplyUpdateParams {
        address plugin;
        PluginSetupRef pluginSetupRef;
        bytes initData;
        MultiTargetPermission[] permissions;
        bytes32 helpersHash;
    }

    struct ApplyUninstallationParams {
        address plugin;
        PluginSetupRef pluginSetupRef;
        MultiTargetPermission[] permissions;
    }

    interface IDAO {
        function grant(address _where, address _who, bytes32 _permissionId);
        function revoke(address _where, address _who, bytes32 _permissionId);
        function grantWithCondition(
            address _where,
            address _who,
            bytes32 _permissionId,
            address _condition
        );
        function setMetadata(bytes _metadata);
        function setDaoURI(string newDaoURI);
        function registerStandardCallback(
            bytes4 _interfaceId,
            bytes4 _callbackSelector,
            bytes4 _magicNumber
        );
        function setSignatureValidator(address _signatureValidator);
        function upgradeTo(address newImplementation);
        function upgradeToAndCall(address newImplementation, bytes data);
        function initializeFrom(uint8[3] _previousProtocolVersion, bytes _initData);
        function withdraw(address _token, address _to, uint256 _amount, string _reference);
    }

    interface IERC20 {
        function transfer(address to, uint256 amount);
    }

    interface IERC721 {
        function safeTransferFrom(address from, address to, uint256 tokenId);
    }

    interface IERC1155 {
        function safeTransferFrom(address from, address to, uint256 id, uint256 amount, bytes data);
        function safeBatchTransferFrom(
            address from,
            address to,
            uint256[] ids,
            uint256[] amounts,
            bytes data
        );
    }

    interface IMajorityVoting {
        function updateVotingSettings(VotingSettings _votingSettings);
    }

    interface IGovernanceERC20 {
        function mint(address to, uint256 amount);
    }

    interface IMembership {
        function addAddresses(address[] _members);
        function removeAddresses(address[] _members);
    }

    interface IMultisig {
        function updateMultisigSettings(MultisigSettings _multisigSettings);
    }

    interface IERC20Voting {
        function changeVoteConfig(
            uint64 _participationRequiredPct,
            uint64 _supportRequiredPct,
            uint64 _minDuration
        );
    }

    interface IAllowlistVoting {
        function addAllowedUsers(address[] _users);
        function removeAllowedUsers(address[] _users);
    }

    interface IPluginSetupProcessor {
        function applyInstallation(address _dao, ApplyInstallationParams _params);
        function applyUpdate(address _dao, ApplyUpdateParams _params);
        function applyUninstallation(address _dao, ApplyUninstallationParams _params);
    }
}
