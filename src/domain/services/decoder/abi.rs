//! Contract ABI bindings for the watched event families

use alloy::sol;

sol! {
    /// Registrar controller: a label was registered
    #[derive(Debug, PartialEq)]
    event NameRegistered(
        string name,
        bytes32 indexed label,
        address indexed owner,
        uint256 baseCost,
        uint256 premium,
        uint256 expires
    );

    /// Registrar controller: a label's registration was extended
    #[derive(Debug, PartialEq)]
    event NameRenewed(string name, bytes32 indexed label, uint256 cost, uint256 expires);

    /// ERC-721 ownership transfer on the registrar
    #[derive(Debug, PartialEq)]
    event Transfer(address indexed from, address indexed to, uint256 indexed tokenId);

    /// Resolver: a text record changed
    #[derive(Debug, PartialEq)]
    event TextChanged(bytes32 indexed node, string indexed indexedKey, string key, string value);

    /// IP asset registry: an asset was registered
    #[derive(Debug, PartialEq)]
    event IPRegistered(
        address ipId,
        uint256 indexed chainId,
        address indexed tokenContract,
        uint256 indexed tokenId,
        string name,
        string uri,
        uint256 registrationDate
    );

    /// Registration entry point whose call data carries the descriptive
    /// fields the IPRegistered log lacks
    function mintAndRegisterIp(
        address nftContract,
        address recipient,
        string title,
        string description,
        string mediaUrl
    );
}
