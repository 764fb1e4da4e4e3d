//! # Access control
//!
//! Two privileged identities exist:
//!
//! ```text
//! Admin   publish articles, withdraw the treasury, hand over admin rights
//! Oracle  deliver randomness through `fulfill`
//! ```
//!
//! The admin is stored once by `init` and replaced only by
//! [`transfer_admin`]. The oracle is part of the immutable
//! [`IssuanceConfig`](crate::types::IssuanceConfig).
//!
//! Every guard calls `require_auth` on the claimed identity first and only
//! then compares it with the stored one, so an unauthorised caller learns
//! nothing from the failure.

use soroban_sdk::{contracttype, Address, Env};

use crate::{events, storage, Error};

/// Privileged role held by an address, if any.
#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Role {
    Admin,
    Oracle,
}

#[contracttype]
#[derive(Clone, Debug, Eq, PartialEq)]
enum AccessKey {
    Admin,
}

pub fn get_admin(env: &Env) -> Result<Address, Error> {
    env.storage()
        .instance()
        .get(&AccessKey::Admin)
        .ok_or(Error::NotInitialized)
}

fn store_admin(env: &Env, admin: &Address) {
    env.storage().instance().set(&AccessKey::Admin, admin);
}

/// Set the initial admin. Fails with `AlreadyInitialized` on a second call.
pub fn init_admin(env: &Env, admin: &Address) -> Result<(), Error> {
    if env.storage().instance().has(&AccessKey::Admin) {
        return Err(Error::AlreadyInitialized);
    }
    store_admin(env, admin);
    events::emit_admin_set(env, None, admin.clone());
    Ok(())
}

/// Hand admin rights from `current` to `new`. Both must authorise.
pub fn transfer_admin(env: &Env, current: &Address, new: &Address) -> Result<(), Error> {
    require_admin(env, current)?;
    new.require_auth();
    store_admin(env, new);
    events::emit_admin_set(env, Some(current.clone()), new.clone());
    Ok(())
}

/// Assert that `caller` signed the invocation and is the admin.
pub fn require_admin(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    if *caller != get_admin(env)? {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

/// Assert that `caller` signed the invocation and is the configured oracle.
pub fn require_oracle(env: &Env, caller: &Address) -> Result<(), Error> {
    caller.require_auth();
    if *caller != storage::get_config(env)?.oracle {
        return Err(Error::Unauthorized);
    }
    Ok(())
}

/// Returns the role held by `address`, or `None`.
pub fn role_of(env: &Env, address: &Address) -> Option<Role> {
    if get_admin(env).ok().as_ref() == Some(address) {
        return Some(Role::Admin);
    }
    match storage::get_config(env) {
        Ok(config) if config.oracle == *address => Some(Role::Oracle),
        _ => None,
    }
}
