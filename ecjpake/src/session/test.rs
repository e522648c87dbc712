#[cfg(test)]
mod test {

    use crate::config::{ReturnBehavior, SessionConfig};
    use crate::curve::NistP256;
    use crate::engine::EcJpake;
    use crate::error::JpakeError;
    use crate::keys::store::{KeySlot, ScalarStore};
    use crate::keys::PreSharedSecret;
    use crate::session::{Session, SessionState};
    use crate::shared_secret::SharedSecret;
    use crate::zkp::transcript::{ChallengeHasher, MerlinChallenge, ThreadChallenge};

    use ark_secp256r1::Config;
    use ark_std::rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    type Secret = PreSharedSecret<Config>;

    fn peer<H: ChallengeHasher<Config>>(
        local: &str,
        remote: &str,
        behavior: ReturnBehavior,
        hasher: H,
    ) -> Session<Config, H> {
        Session::new(
            EcJpake::new(NistP256::new(), behavior),
            SessionConfig::new(local, remote),
            hasher,
        )
    }

    fn test_template() -> (
        ChaCha20Rng,
        Session<Config, ThreadChallenge>,
        Session<Config, ThreadChallenge>,
    ) {
        (
            ChaCha20Rng::seed_from_u64(31),
            peer("client", "server", ReturnBehavior::Blocking, ThreadChallenge::new()),
            peer("server", "client", ReturnBehavior::Blocking, ThreadChallenge::new()),
        )
    }

    fn run<H: ChallengeHasher<Config>>(
        rng: &mut ChaCha20Rng,
        client: &mut Session<Config, H>,
        server: &mut Session<Config, H>,
        client_secret: &[u8],
        server_secret: &[u8],
    ) -> Result<(SharedSecret<Config>, SharedSecret<Config>), JpakeError> {
        let curve = NistP256::new();
        let client_secret = Secret::from_octets(&curve, client_secret)?;
        let server_secret = Secret::from_octets(&curve, server_secret)?;

        let client_one = client.round_one(rng)?;
        let server_one = server.round_one(rng)?;
        client.verify_round_one(&server_one)?;
        server.verify_round_one(&client_one)?;

        let client_two = client.round_two(&client_secret, rng)?;
        let server_two = server.round_two(&server_secret, rng)?;

        Ok((client.finish(&server_two)?, server.finish(&client_two)?))
    }

    #[test]
    fn test_honest_exchange() {
        let (mut rng, mut client, mut server) = test_template();

        let (client_k, server_k) =
            run(&mut rng, &mut client, &mut server, b"threadjpaketest", b"threadjpaketest")
                .unwrap();

        assert_eq!(client_k.to_octets().len(), 65);
        assert_eq!(client_k, server_k);
        assert_eq!(client.state(), SessionState::Complete);
        assert_eq!(server.state(), SessionState::Complete);

        for slot in [
            KeySlot::PrivateKey1,
            KeySlot::PrivateKey2,
            KeySlot::CombinedPrivateKey,
        ] {
            assert!(!client.store().contains(slot));
            assert!(!server.store().contains(slot));
        }
    }

    #[test]
    fn test_honest_exchange_with_merlin() {
        let mut rng = ChaCha20Rng::seed_from_u64(32);
        let mut client = peer(
            "client",
            "server",
            ReturnBehavior::Blocking,
            MerlinChallenge::default(),
        );
        let mut server = peer(
            "server",
            "client",
            ReturnBehavior::Blocking,
            MerlinChallenge::default(),
        );

        let (client_k, server_k) =
            run(&mut rng, &mut client, &mut server, b"passphrase", b"passphrase").unwrap();

        assert_eq!(client_k, server_k);
    }

    #[test]
    fn test_wrong_password() {
        let (mut rng, mut client, mut server) = test_template();

        let (client_k, server_k) =
            run(&mut rng, &mut client, &mut server, b"threadjpaketest", b"threadjpaketesu")
                .unwrap();

        assert_ne!(client_k, server_k);
    }

    #[test]
    fn test_identity_mismatch_fails_verification() {
        let mut rng = ChaCha20Rng::seed_from_u64(33);
        let mut client = peer("client", "server", ReturnBehavior::Blocking, ThreadChallenge::new());
        let mut server = peer(
            "server",
            "intruder",
            ReturnBehavior::Blocking,
            ThreadChallenge::new(),
        );

        let client_one = client.round_one(&mut rng).unwrap();
        server.round_one(&mut rng).unwrap();

        assert_eq!(
            server.verify_round_one(&client_one),
            Err(JpakeError::ProofVerificationError(String::from(
                "Schnorr Identification"
            )))
        );
        assert_eq!(server.state(), SessionState::Aborted);
        assert!(!server.store().contains(KeySlot::PrivateKey2));
    }

    #[test]
    fn test_tampered_round_two() {
        let (mut rng, mut client, mut server) = test_template();
        let curve = NistP256::new();
        let secret = Secret::from_octets(&curve, b"threadjpaketest").unwrap();

        let client_one = client.round_one(&mut rng).unwrap();
        let server_one = server.round_one(&mut rng).unwrap();
        client.verify_round_one(&server_one).unwrap();
        server.verify_round_one(&client_one).unwrap();
        client.round_two(&secret, &mut rng).unwrap();
        let mut server_two = server.round_two(&secret, &mut rng).unwrap();

        // Swapping in the round one key keeps every point valid but breaks the proof.
        server_two.combined_public_key = server_one.public_key1;

        assert_eq!(
            client.finish(&server_two).err(),
            Some(JpakeError::ProofVerificationError(String::from(
                "Schnorr Identification"
            )))
        );
        assert_eq!(client.state(), SessionState::Aborted);
        assert!(!client.store().contains(KeySlot::PrivateKey2));
        assert!(!client.store().contains(KeySlot::CombinedPrivateKey));
    }

    #[test]
    fn test_out_of_order_calls() {
        let (mut rng, mut client, mut server) = test_template();
        let curve = NistP256::new();
        let secret = Secret::from_octets(&curve, b"threadjpaketest").unwrap();

        assert_eq!(
            client.round_two(&secret, &mut rng).err(),
            Some(JpakeError::InvalidSessionState {
                expected: SessionState::AwaitingRoundTwo,
                actual: SessionState::AwaitingRoundOne,
            })
        );
        // Misuse does not abort the session.
        assert_eq!(client.state(), SessionState::AwaitingRoundOne);

        let server_one = server.round_one(&mut rng).unwrap();
        assert!(matches!(
            client.verify_round_one(&server_one),
            Err(JpakeError::InvalidSessionState { .. })
        ));

        client.round_one(&mut rng).unwrap();
        assert!(matches!(
            client.round_one(&mut rng),
            Err(JpakeError::InvalidSessionState { .. })
        ));
        assert_eq!(client.state(), SessionState::AwaitingRoundOneVerify);
    }

    #[test]
    fn test_skipped_round_is_not_blamed_on_the_peer() {
        let (mut rng, mut client, _) = test_template();
        let curve = NistP256::new();
        let secret = Secret::from_octets(&curve, b"threadjpaketest").unwrap();

        client.round_one(&mut rng).unwrap();
        let err = client.round_two(&secret, &mut rng).err().unwrap();

        assert!(!err.is_invalid_public_key());
        assert_eq!(
            err,
            JpakeError::InvalidSessionState {
                expected: SessionState::AwaitingRoundTwo,
                actual: SessionState::AwaitingRoundOneVerify,
            }
        );
        assert!(client.store().contains(KeySlot::PrivateKey2));
    }

    #[test]
    fn test_aborted_session_refuses_work() {
        let (mut rng, mut client, _) = test_template();

        client.round_one(&mut rng).unwrap();
        assert!(client.store().contains(KeySlot::PrivateKey2));

        client.abort();

        assert_eq!(client.state(), SessionState::Aborted);
        assert!(!client.store().contains(KeySlot::PrivateKey2));
        assert!(matches!(
            client.round_one(&mut rng),
            Err(JpakeError::InvalidSessionState {
                actual: SessionState::Aborted,
                ..
            })
        ));
    }

    #[test]
    fn test_busy_resource_is_retryable() {
        let mut rng = ChaCha20Rng::seed_from_u64(34);
        let engine = EcJpake::new(NistP256::new(), ReturnBehavior::NonBlocking);
        let lock = engine.access_lock().clone();
        let mut client = Session::new(engine, SessionConfig::default(), ThreadChallenge::new());

        {
            let _held = lock.acquire(ReturnBehavior::Blocking, None).unwrap();
            assert!(matches!(
                client.round_one(&mut rng),
                Err(JpakeError::ResourceUnavailable)
            ));
            assert_eq!(client.state(), SessionState::AwaitingRoundOne);
        }

        assert!(client.round_one(&mut rng).is_ok());
        assert_eq!(client.state(), SessionState::AwaitingRoundOneVerify);
    }

    #[test]
    fn test_zero_password_aborts_round_two() {
        let (mut rng, mut client, mut server) = test_template();

        assert_eq!(
            run(&mut rng, &mut client, &mut server, &[0u8; 32], &[0u8; 32]).err(),
            Some(JpakeError::InvalidPrivateKey)
        );
        assert_eq!(client.state(), SessionState::Aborted);
    }
}
