extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    token, vec, Address, BytesN, Env, IntoVal, String, TryIntoVal,
};

use crate::events::{ArticlePublished, Minted, PurchaseRequested, Transferred, Withdrawn};
use crate::testutils::{MockRandomnessOracle, MockRandomnessOracleClient};
use crate::{ArticleIssuance, ArticleIssuanceClient, IssuanceConfig};

const PRICE: i128 = 500;

fn setup() -> (Env, ArticleIssuanceClient<'static>, MockRandomnessOracleClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();
    let client = ArticleIssuanceClient::new(&env, &env.register(ArticleIssuance, ()));
    let oracle = MockRandomnessOracleClient::new(&env, &env.register(MockRandomnessOracle, ()));
    let token = env.register_stellar_asset_contract_v2(Address::generate(&env));

    let admin = Address::generate(&env);
    let config = IssuanceConfig {
        oracle: oracle.address.clone(),
        payment_token: token.address(),
        key_hash: BytesN::from_array(&env, &[0xabu8; 32]),
        subscription_id: 1,
        request_confirmations: 3,
        callback_gas_limit: 300_000,
        num_words: 1,
        mint_price: PRICE,
        max_supply: 100,
        default_variants: 3,
    };
    client.init(&admin, &config);
    (env, client, oracle, admin)
}

fn funded_user(env: &Env, client: &ArticleIssuanceClient) -> Address {
    let user = Address::generate(env);
    token::StellarAssetClient::new(env, &client.config().payment_token).mint(&user, &PRICE);
    user
}

#[test]
fn test_article_published_event() {
    let (env, client, _, admin) = setup();
    let uri = String::from_str(&env, "ipfs://uri-example/1.json");
    let article_id = client.publish(&admin, &uri);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("published"), article_id)
    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![&env, symbol_short!("published").into_val(&env), article_id.into_val(&env)];
    assert_eq!(last_event.1, expected_topics);

    let event_data: ArticlePublished = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(event_data, ArticlePublished { article_id: 1, uri });
}

#[test]
fn test_purchase_requested_event() {
    let (env, client, _, admin) = setup();
    let user = funded_user(&env, &client);
    client.publish(&admin, &String::from_str(&env, "ipfs://a"));
    let request_id = client.request_purchase(&user, &1, &PRICE);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![&env, symbol_short!("requested").into_val(&env), request_id.into_val(&env)];
    assert_eq!(last_event.1, expected_topics);

    let event_data: PurchaseRequested = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(event_data, PurchaseRequested {
        request_id,
        article_id: 1,
        requester: user,
    });
}

#[test]
fn test_minted_event() {
    let (env, client, oracle, admin) = setup();
    let user = funded_user(&env, &client);
    client.publish(&admin, &String::from_str(&env, "ipfs://a"));
    let request_id = client.request_purchase(&user, &1, &PRICE);
    oracle.fulfill_random_words(&request_id);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![&env, symbol_short!("minted").into_val(&env), 1u64.into_val(&env)];
    assert_eq!(last_event.1, expected_topics);

    let event_data: Minted = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(event_data, Minted {
        token_id: 1,
        requester: user,
        article_id: 1,
    });
}

#[test]
fn test_transferred_event() {
    let (env, client, oracle, admin) = setup();
    let from = funded_user(&env, &client);
    let to = Address::generate(&env);
    client.publish(&admin, &String::from_str(&env, "ipfs://a"));
    let request_id = client.request_purchase(&from, &1, &PRICE);
    oracle.fulfill_random_words(&request_id);

    client.transfer(&from, &to, &1);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![&env, symbol_short!("transfer").into_val(&env), 1u64.into_val(&env)];
    assert_eq!(last_event.1, expected_topics);

    let event_data: Transferred = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(event_data, Transferred { token_id: 1, from, to });
}

#[test]
fn test_withdrawn_event() {
    let (env, client, _, admin) = setup();
    let user = funded_user(&env, &client);
    client.publish(&admin, &String::from_str(&env, "ipfs://a"));
    client.request_purchase(&user, &1, &PRICE);

    client.withdraw(&admin);

    let all_events = env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, client.address);
    let expected_topics = vec![&env, symbol_short!("withdrawn").into_val(&env), admin.into_val(&env)];
    assert_eq!(last_event.1, expected_topics);

    let event_data: Withdrawn = last_event.2.try_into_val(&env).unwrap();
    assert_eq!(event_data, Withdrawn { admin, amount: PRICE });
}
