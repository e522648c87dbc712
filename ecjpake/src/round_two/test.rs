#[cfg(test)]
mod test {

    use crate::curve::NistP256;
    use crate::error::JpakeError;
    use crate::keys::{PreSharedSecret, PrivateScalar, PublicPoint};
    use crate::round_one::RoundOneKeys;
    use crate::round_two::{RoundTwoInputs, RoundTwoKeys};

    use ark_secp256r1::Config;
    use ark_std::rand::SeedableRng;
    use rand_chacha::ChaCha20Rng;

    type Keys = RoundOneKeys<Config>;
    type Point = PublicPoint<Config>;

    fn test_template() -> (ChaCha20Rng, NistP256, Keys, Keys, PreSharedSecret<Config>) {
        let mut rng = ChaCha20Rng::seed_from_u64(11);
        let curve = NistP256::new();

        let client = Keys::generate(&curve, &mut rng).unwrap();
        let server = Keys::generate(&curve, &mut rng).unwrap();
        let secret = PreSharedSecret::from_octets(&curve, b"threadjpaketest").unwrap();

        (rng, curve, client, server, secret)
    }

    fn inputs<'a>(
        me: &'a Keys,
        them: &'a Keys,
        secret: &'a PreSharedSecret<Config>,
    ) -> RoundTwoInputs<'a, Config> {
        RoundTwoInputs {
            my_private_key2: &me.private_key2,
            my_public_key1: &me.public_key1,
            my_public_key2: &me.public_key2,
            their_public_key1: &them.public_key1,
            their_public_key2: &them.public_key2,
            pre_shared_secret: secret,
        }
    }

    #[test]
    fn test_generators() {
        let (mut rng, curve, client, server, secret) = test_template();

        let ours = RoundTwoKeys::generate(&curve, &inputs(&client, &server, &secret), &mut rng)
            .unwrap();
        let theirs = RoundTwoKeys::generate(&curve, &inputs(&server, &client, &secret), &mut rng)
            .unwrap();

        let expected = curve.point_add(
            &curve.point_add(client.public_key1.as_affine(), server.public_key1.as_affine()),
            server.public_key2.as_affine(),
        );
        assert_eq!(*ours.my_generator.as_affine(), expected);

        // Each side predicts exactly the generator the other proves against.
        assert_eq!(ours.their_generator, theirs.my_generator);
        assert_eq!(theirs.their_generator, ours.my_generator);
    }

    #[test]
    fn test_combined_key() {
        let (mut rng, curve, client, server, secret) = test_template();

        let keys = RoundTwoKeys::generate(&curve, &inputs(&client, &server, &secret), &mut rng)
            .unwrap();

        let expected_scalar = *client.private_key2.expose() * secret.expose();
        assert_eq!(*keys.combined_private_key.expose(), expected_scalar);
        assert_eq!(
            *keys.combined_public_key.as_affine(),
            curve.scalar_mult(&expected_scalar, keys.my_generator.as_affine())
        );
        assert_eq!(
            *keys.public_v.as_affine(),
            curve.scalar_mult(keys.private_v.expose(), keys.my_generator.as_affine())
        );
    }

    #[test]
    fn test_generate_with_v() {
        let (_, curve, client, server, secret) = test_template();

        let mut three = [0u8; 32];
        three[31] = 3;
        let v = PrivateScalar::from_octets(&curve, &three).unwrap();

        let keys =
            RoundTwoKeys::generate_with_v(&curve, &inputs(&client, &server, &secret), v).unwrap();

        let g = *keys.my_generator.as_affine();
        let tripled = curve.point_add(&curve.point_add(&g, &g), &g);
        assert_eq!(*keys.public_v.as_affine(), tripled);
    }

    #[test]
    fn test_zero_secret_is_rejected() {
        let (mut rng, curve, client, server, _) = test_template();

        let zero = PreSharedSecret::from_octets(&curve, &[0u8; 32]).unwrap();
        assert!(matches!(
            RoundTwoKeys::generate(&curve, &inputs(&client, &server, &zero), &mut rng),
            Err(JpakeError::InvalidPrivateKey)
        ));

        // A secret equal to n reduces to zero as well.
        let order = PreSharedSecret::from_octets(&curve, &curve.order()).unwrap();
        assert!(matches!(
            RoundTwoKeys::generate(&curve, &inputs(&client, &server, &order), &mut rng),
            Err(JpakeError::InvalidPrivateKey)
        ));
    }

    #[test]
    fn test_infinity_inputs() {
        let (mut rng, curve, client, server, secret) = test_template();

        let infinity: Point = curve
            .point_sub(server.public_key1.as_affine(), server.public_key1.as_affine())
            .into();
        let mut bad_inputs = inputs(&client, &server, &secret);
        bad_inputs.their_public_key1 = &infinity;

        assert!(matches!(
            RoundTwoKeys::generate(&curve, &bad_inputs, &mut rng),
            Err(JpakeError::PointAtInfinity)
        ));
    }

    #[test]
    fn test_generator_at_infinity() {
        let (mut rng, curve, client, server, secret) = test_template();

        // X4 = -(X1 + X3) makes G' the point at infinity.
        let sum = curve.point_add(client.public_key1.as_affine(), server.public_key1.as_affine());
        let negated: Point = curve.point_sub(&curve.point_sub(&sum, &sum), &sum).into();

        let mut bad_inputs = inputs(&client, &server, &secret);
        bad_inputs.their_public_key2 = &negated;

        assert!(matches!(
            RoundTwoKeys::generate(&curve, &bad_inputs, &mut rng),
            Err(JpakeError::PointAtInfinity)
        ));
    }
}
