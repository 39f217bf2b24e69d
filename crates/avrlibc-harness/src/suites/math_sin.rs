//! `sin()` on 500 random arguments with `|x| < 10`, within 2 ULP.

use avrlibc_fixture_exec::format_bits;
use serde_json::json;

use crate::check::{CheckResult, ToleranceChecker};
use crate::exit_code::ExitPolicy;
use crate::fixtures::{FixtureCase, FixtureSet};
use crate::routines::Routines;
use crate::suites::Suite;
use crate::table::{TestCase, case};

pub(crate) const SUITE: Suite = Suite {
    name: "math-sin-500",
    symbol: "sin",
    description: "sin() on 500 random arguments, 2 ulp tolerance",
    policy: ExitPolicy::Index,
    run,
    export: Some(export),
};

pub const MAX_ULP: u32 = 2;

/// `(x, sin(x))` bit patterns.
pub static TABLE: [TestCase<u32, u32>; 500] = [
    case(0xbe46_3583, 0xbe44_f940),
    case(0x3f38_0afe, 0x3f28_9816),
    case(0x3f06_7d3a, 0x3f00_633f),
    case(0xbece_ac19, 0xbec9_1af6),
    case(0x3f1f_ad4c, 0x3f15_85d6),
    case(0xbf9c_654f, 0xbf70_9230),
    case(0x40af_af14, 0xbf36_66cd),
    case(0x3f31_d799, 0x3f23_e0ff),
    case(0xbf30_6b02, 0xbf22_c841),
    case(0xbef4_82ca, 0xbeeb_5281),
    case(0xbfd9_3ff6, 0xbf7d_f49a),
    case(0x3f33_09e6, 0x3f24_cbda),
    case(0xbf14_d4e8, 0xbf0c_9691),
    case(0x4022_93be, 0x3f10_d40e),
    case(0x3f31_903b, 0x3f23_aa25),
    case(0xbf0f_eaf4, 0xbf08_74b8),
    case(0xbf37_7155, 0xbf28_2455),
    case(0x3f4f_4acc, 0x3f39_5ee9),
    case(0xc016_d14f, 0xbf34_f59f),
    case(0xbf4f_f582, 0xbf39_d47d),
    case(0xbcf3_d280, 0xbcf3_c949),
    case(0x40f2_0695, 0x3f75_42bf),
    case(0xbf4f_4202, 0xbf39_58d9),
    case(0x3f69_ce9e, 0x3f4a_a1bb),
    case(0xc006_6b37, 0xbf5c_f190),
    case(0xbf6b_bb40, 0xbf4b_cd53),
    case(0x3f1c_2754, 0x3f12_a61b),
    case(0xbfca_c146, 0xbf7f_fa44),
    case(0x3efa_52a6, 0x3ef0_77fe),
    case(0x3f24_d1f2, 0x3f19_aac3),
    case(0xbf65_88a7, 0xbf47_fdfa),
    case(0xc06b_e5a1, 0x3f04_8fb0),
    case(0xbee2_e461, 0xbedb_89da),
    case(0x3f6c_c6b5, 0x3f4c_6ebe),
    case(0xbee4_5026, 0xbedc_d244),
    case(0xbf7f_1174, 0xbf56_e964),
    case(0x3f03_1edf, 0x3efa_ecb6),
    case(0xbf80_cb9d, 0xbf58_459a),
    case(0xbec9_94bc, 0xbec4_69d3),
    case(0xbe86_e164, 0xbe85_5363),
    case(0xbf93_c6d3, 0xbf6a_22e5),
    case(0xbf4b_dbca, 0xbf36_fc6b),
    case(0xbf11_06de, 0xbf09_649c),
    case(0xbf34_0453, 0xbf25_8b2f),
    case(0xbf9d_3eef, 0xbf71_25a6),
    case(0x3f81_0f7c, 0x3f58_8e1d),
    case(0x3f37_18a7, 0x3f27_e16d),
    case(0x4012_c18d, 0x3f40_143f),
    case(0xbf18_51c4, 0xbf0f_7d60),
    case(0x3f5d_e7d6, 0x3f43_245f),
    case(0x3f0b_5064, 0x3f04_89f2),
    case(0xbf47_82d0, 0xbf33_eb5a),
    case(0xbea8_6772, 0xbea5_624f),
    case(0xbe4e_fa6d, 0xbe4d_925d),
    case(0xbfce_b26b, 0xbf7f_c081),
    case(0xbec2_0dd4, 0xbebd_70f9),
    case(0xbf6b_602f, 0xbf4b_962a),
    case(0x3ec9_f8d4, 0x3ec4_c63e),
    case(0x3f05_2dc5, 0x3efe_8131),
    case(0xbf04_4531, 0xbefc_ed2a),
    case(0x3f06_9c71, 0x3f00_7e3f),
    case(0xbeec_6798, 0xbee4_1803),
    case(0xbf06_464d, 0xbf00_33b7),
    case(0x3ec4_2373, 0x3ebf_6052),
    case(0xbfe5_3af6, 0xbf79_d37a),
    case(0xbf0c_741f, 0xbf05_8333),
    case(0x3e9e_891d, 0x3e9c_03b0),
    case(0xbf0b_2be9, 0xbf04_6abb),
    case(0xbd93_1696, 0xbd92_f639),
    case(0x3f0c_9953, 0x3f05_a2ef),
    case(0x40ce_290d, 0x3e22_75d1),
    case(0x3fa2_579c, 0x3f74_605d),
    case(0x3f8a_e0b2, 0x3f62_612a),
    case(0xbeea_b4fa, 0xbee2_9296),
    case(0x3f8b_6399, 0x3f62_daf2),
    case(0x4086_869a, 0xbf5f_9d72),
    case(0x3f4d_8202, 0x3f38_22b8),
    case(0xbf94_b83a, 0xbf6a_e480),
    case(0xbf07_886e, 0xbf01_4a25),
    case(0x3f4d_9d9e, 0x3f38_35e5),
    case(0x3f1e_8c0d, 0x3f14_9aaf),
    case(0xbf6a_2b11, 0xbf4a_da2d),
    case(0xbf8b_a39b, 0xbf63_1628),
    case(0x40b8_45ec, 0xbf00_3ba4),
    case(0xbf62_ee29, 0xbf46_5b47),
    case(0x3fc6_cb16, 0x3f7f_f5b5),
    case(0xbef7_bb4e, 0xbeee_2d94),
    case(0xbf4c_9716, 0xbf37_7f36),
    case(0xbf32_3c1a, 0xbf24_2e29),
    case(0xbedc_a08a, 0xbed5_dcc3),
    case(0x4030_cf97, 0x3ebd_6617),
    case(0x3ed0_212d, 0x3eca_71d9),
    case(0xc00c_8e09, 0xbf4f_8cfb),
    case(0xbf3c_824a, 0xbf2b_edd3),
    case(0xbee6_c513, 0xbedf_0909),
    case(0x3f84_c0e8, 0x3f5c_6750),
    case(0x3f1a_6e1a, 0x3f11_3b99),
    case(0xbe07_8626, 0xbe07_20f4),
    case(0x3fd6_2e07, 0x3f7e_a825),
    case(0x3f17_c530, 0x3f0f_08df),
    case(0xbf4e_3686, 0xbf38_9ff2),
    case(0xbf7d_f4d4, 0xbf56_4e38),
    case(0xbf31_b8da, 0xbf23_c95f),
    case(0xbef8_ca8b, 0xbeef_1d8c),
    case(0x3e8c_4e3a, 0x3e8a_8e5e),
    case(0xbee5_4840, 0xbedd_b201),
    case(0x3f36_00cb, 0x3f27_0dc1),
    case(0x3f50_7c12, 0x3f3a_30f0),
    case(0xbf47_331f, 0xbf33_b2a0),
    case(0x3f31_c555, 0x3f23_d2f6),
    case(0x3f11_e3ab, 0x3f0a_1eb7),
    case(0xbf49_7de2, 0xbf35_52b0),
    case(0xbf6a_8cd4, 0xbf4b_15c1),
    case(0xbf4b_eead, 0xbf37_09a0),
    case(0x3ec3_eac4, 0x3ebf_2bbd),
    case(0x3f4d_7a8b, 0x3f38_1d88),
    case(0xbf2f_f313, 0xbf22_6b9f),
    case(0xbe8c_5e9a, 0xbe8a_9e21),
    case(0xc03e_c959, 0xbe23_b384),
    case(0x3a5f_ecd8, 0x3a5f_ecd6),
    case(0x3f66_7883, 0x3f48_935e),
    case(0x3f74_32c2, 0x3f50_d03f),
    case(0xbf82_dada, 0xbf5a_729f),
    case(0xbf14_0f38, 0xbf0b_f132),
    case(0x3f03_a383, 0x3efb_d3d2),
    case(0xbf36_bff2, 0xbf27_9e6a),
    case(0xbd5d_becb, 0xbd5d_a311),
    case(0x3e9c_9173, 0x3e9a_23ae),
    case(0x3f4b_cab5, 0x3f36_f078),
    case(0xbef4_8b75, 0xbeeb_5a34),
    case(0x3f49_39f9, 0x3f35_22b9),
    case(0xbf6b_17c2, 0xbf4b_6a39),
    case(0xbf43_1e8e, 0xbf30_c4d7),
    case(0xbf37_7dd0, 0xbf28_2dbf),
    case(0xbd40_a9b4, 0xbd40_9785),
    case(0xbefc_a85c, 0xbef2_8709),
    case(0x3f31_b48b, 0x3f23_c60f),
    case(0xbf13_06e7, 0xbf0b_1393),
    case(0x3f32_188f, 0x3f24_12e2),
    case(0x3e04_af2a, 0x3e04_5032),
    case(0x3f35_90e7, 0x3f26_b8e8),
    case(0x3f32_bc2b, 0x3f24_9057),
    case(0x3f0e_1bab, 0x3f06_ebdd),
    case(0x3f32_c27a, 0x3f24_952c),
    case(0xbf48_b241, 0xbf34_c2b8),
    case(0x3f32_4464, 0x3f24_3485),
    case(0x3f00_aee3, 0x3ef6_a9ff),
    case(0x3f33_1953, 0x3f24_d7a8),
    case(0xbb5a_94c2, 0xbb5a_94a7),
    case(0x405b_87ef, 0xbe91_b5d3),
    case(0xbf4c_7e0b, 0xbf37_6dbf),
    case(0xbede_736f, 0xbed7_84a0),
    case(0x3f37_cec1, 0x3f28_6abc),
    case(0xbf21_59d8, 0xbf16_e0de),
    case(0x3f67_1996, 0x3f48_f74e),
    case(0x3f49_79f8, 0x3f35_4fec),
    case(0xbeb9_6a8d, 0xbeb5_63d3),
    case(0x3ef8_856d, 0x3eee_e06c),
    case(0x3f6f_c784, 0x3f4e_39e2),
    case(0xc10e_923b, 0xbefb_c43b),
    case(0x3fa1_c817, 0x3f74_0a41),
    case(0x3f51_7ad8, 0x3f3a_df6f),
    case(0xbf35_77c1, 0xbf26_a5d2),
    case(0x3f0f_2aea, 0x3f07_d216),
    case(0x3f53_a51c, 0x3f3c_588b),
    case(0xbf6a_450f, 0xbf4a_ea07),
    case(0xbf7f_c69f, 0xbf57_4b9f),
    case(0x3d40_a1e5, 0x3d40_8fb8),
    case(0xbf86_ca18, 0xbf5e_7265),
    case(0x3f16_96d9, 0x3f0e_0dbc),
    case(0xbf33_49a1, 0xbf24_fc9a),
    case(0xbf7e_d5ec, 0xbf56_c905),
    case(0x3f6d_4c9a, 0x3f4c_bf3a),
    case(0xbf12_ea4f, 0xbf0a_fb91),
    case(0x3e6e_479b, 0x3e6c_229a),
    case(0x3f4c_1513, 0x3f37_2476),
    case(0xbef4_6873, 0xbeeb_3b1c),
    case(0x4018_b64a, 0x3f2f_8558),
    case(0xbf5e_b195, 0xbf43_a6b7),
    case(0x3f35_9159, 0x3f26_b93f),
    case(0xbfb0_c265, 0xbf7b_6650),
    case(0x3f2f_20a4, 0x3f21_c8c0),
    case(0xbf61_e083, 0xbf45_b062),
    case(0xbf36_acc1, 0xbf27_8fe9),
    case(0xbf98_1f90, 0xbf6d_8416),
    case(0x3ed8_66c1, 0x3ed2_0403),
    case(0xbf1b_12f2, 0xbf11_c33b),
    case(0xbf46_e5a6, 0xbf33_7b6a),
    case(0x3f36_c900, 0x3f27_a542),
    case(0xbf77_9069, 0xbf52_be15),
    case(0x3f33_8dc1, 0x3f25_30ab),
    case(0x3f15_0c7e, 0x3f0c_c502),
    case(0xbf72_67ee, 0xbf4f_c581),
    case(0x3ee8_e87e, 0x3ee0_f549),
    case(0x3758_6f2e, 0x3758_6f2e),
    case(0x3f62_5d15, 0x3f45_ff70),
    case(0xbf7d_f422, 0xbf56_4dd6),
    case(0x3f1a_fe94, 0x3f11_b27c),
    case(0x3eff_062f, 0x3ef4_9bea),
    case(0x3fc3_eb3e, 0x3f7f_cb1b),
    case(0x3f31_5364, 0x3f23_7b58),
    case(0xbf65_96f9, 0xbf48_06eb),
    case(0xbf34_9a96, 0xbf25_fdb0),
    case(0xbfe3_6fdd, 0xbf7a_95a1),
    case(0xbf98_c5d0, 0xbf6d_ff5a),
    case(0x3f36_f3c8, 0x3f27_c595),
    case(0x3f89_d5bd, 0x3f61_65f1),
    case(0x3f5c_4e22, 0x3f42_1a37),
    case(0xbf0c_32eb, 0xbf05_4b8c),
    case(0x3e6c_61d6, 0x3e6a_49d3),
    case(0xbedb_1e8c, 0xbed4_7dd1),
    case(0x3efc_8d05, 0x3ef2_6ef5),
    case(0x3eb6_d176, 0x3eb2_f547),
    case(0xbe57_9cfe, 0xbe56_0608),
    case(0x3ebf_fac5, 0x3ebb_8335),
    case(0x400a_286c, 0x3f55_0438),
    case(0x3f32_3c93, 0x3f24_2e86),
    case(0x3ee4_40cf, 0x3edc_c46d),
    case(0x3fc5_07d3, 0x3f7f_df80),
    case(0xbf85_73b9, 0xbf5d_1c65),
    case(0x3f31_fc98, 0x3f23_fd6a),
    case(0xbf32_cf93, 0xbf24_9f34),
    case(0x3f1b_aeab, 0x3f12_4324),
    case(0x3f65_65bd, 0x3f47_e82d),
    case(0x3f83_7822, 0x3f5b_15fe),
    case(0x3e6b_4907, 0x3e69_386e),
    case(0xbf1c_3965, 0xbf12_b4e9),
    case(0x3f4c_b033, 0x3f37_90b8),
    case(0xbec1_8d34, 0xbebc_f974),
    case(0x3c55_7eff, 0x3c55_7d73),
    case(0x20cd_fc7e, 0x20cd_fc7e),
    case(0x40db_9e6e, 0x3f0c_460c),
    case(0x3f4b_b892, 0x3f36_e3c8),
    case(0xbf19_ddd1, 0xbf10_c4b1),
    case(0x3f4d_ed46, 0x3f38_6d2d),
    case(0xbf0a_8f52, 0xbf03_e49f),
    case(0x3f79_9c06, 0x3f53_e5a2),
    case(0xbd45_3aed, 0xbd45_276b),
    case(0xbf8b_6a0c, 0xbf62_e0eb),
    case(0x3ff6_8adf, 0x3f70_0262),
    case(0xac58_04b8, 0xac58_04b8),
    case(0x3f5e_7476, 0x3f43_7f47),
    case(0xbf68_3995, 0xbf49_a936),
    case(0xbfe4_2c50, 0xbf7a_4775),
    case(0x3eea_8fa0, 0x3ee2_7117),
    case(0xbf0e_831c, 0xbf07_43bb),
    case(0xbf45_c245, 0xbf32_ab31),
    case(0xbf65_9e16, 0xbf48_0b5b),
    case(0x3f07_9fd2, 0x3f01_5e54),
    case(0x3fa7_d6fa, 0x3f77_6cf0),
    case(0x3f20_d05b, 0x3f16_71b6),
    case(0x3f10_d487, 0x3f09_3a1f),
    case(0x3e38_e8dd, 0x3e37_e806),
    case(0x3f32_82ec, 0x3f24_6479),
    case(0x3fae_9231, 0x3f7a_8978),
    case(0x3f26_3b1c, 0x3f1a_cb06),
    case(0xbf66_e5ed, 0xbf48_d749),
    case(0x3f7f_4f87, 0x3f57_0b18),
    case(0x3f97_01b3, 0x3f6c_ac79),
    case(0xbf47_7e68, 0xbf33_e837),
    case(0x3fbc_02e2, 0x3f7e_aba8),
    case(0x3f20_3521, 0x3f15_f402),
    case(0xbf32_ba4c, 0xbf24_8ee8),
    case(0xbf86_127e, 0xbf5d_bbc3),
    case(0x3f64_152a, 0x3f47_1541),
    case(0x3f1d_2207, 0x3f13_7351),
    case(0x406e_d7e6, 0xbf0e_7fe7),
    case(0x3f18_d148, 0x3f0f_e6e8),
    case(0x3f92_93a8, 0x3f69_27d9),
    case(0xbf84_61ab, 0xbf5c_062e),
    case(0x3ff1_59b3, 0x3f73_6c65),
    case(0x3f64_a9c5, 0x3f47_728c),
    case(0xbf18_9b32, 0xbf0f_ba29),
    case(0x3f37_30be, 0x3f27_f39c),
    case(0x3f92_8e35, 0x3f69_2358),
    case(0x3f4e_85f8, 0x3f38_d6f2),
    case(0x3f5c_c67e, 0x3f42_689b),
    case(0xbf05_9a94, 0xbeff_3dee),
    case(0xbf6c_7613, 0xbf4c_3e2c),
    case(0xbf45_9d90, 0xbf32_90e5),
    case(0xbf3a_9633, 0xbf2a_7ffe),
    case(0xc09d_7093, 0x3f7a_80cc),
    case(0x3fb4_3dd5, 0x3f7c_9eef),
    case(0xbee6_8fe7, 0xbede_d92c),
    case(0xbf4a_0358, 0xbf35_b0ce),
    case(0xbd53_4026, 0xbd53_282d),
    case(0x3f4a_3ebd, 0x3f35_daa0),
    case(0xbfd3_ab0c, 0xbf7f_1f25),
    case(0xbe9f_3846, 0xbe9c_aa7b),
    case(0xc065_2b52, 0x3ed9_b30d),
    case(0x3f7e_0827, 0x3f56_58c9),
    case(0xbfb6_9313, 0xbf7d_559e),
    case(0x3f14_cd0e, 0x3f0c_9001),
    case(0x3fa8_f534, 0x3f77_fd70),
    case(0x3f6b_ff99, 0x3f4b_f6a8),
    case(0xbf1d_e5cf, 0xbf14_1332),
    case(0xbf6b_cbf4, 0xbf4b_d76e),
    case(0x3f4d_33a3, 0x3f37_ec3d),
    case(0xbf53_3b7f, 0xbf3c_10f4),
    case(0xbf11_3c8a, 0xbf09_91e2),
    case(0xbf10_c7aa, 0xbf09_2f43),
    case(0xbefe_2dab, 0xbef3_dd9f),
    case(0x3f4c_d973, 0x3f37_ad76),
    case(0x3f35_7014, 0x3f26_9ffe),
    case(0x3f7c_bdb4, 0x3f55_a36a),
    case(0x3efc_fc75, 0x3ef2_d116),
    case(0x3f22_d32f, 0x3f18_1110),
    case(0x37f4_be73, 0x37f4_be73),
    case(0x3f36_2347, 0x3f27_27e1),
    case(0xbf6e_4c10, 0xbf4d_582d),
    case(0x3f47_6849, 0x3f33_d87a),
    case(0x3efc_eb3b, 0x3ef2_c1ec),
    case(0x3f50_fea4, 0x3f3a_8a75),
    case(0xbf0c_d74e, 0xbf05_d7c9),
    case(0xbf0f_a58c, 0xbf08_39f9),
    case(0xbfe2_604b, 0xbf7b_028e),
    case(0xbf24_4939, 0xbf19_3d54),
    case(0x3f10_8475, 0x3f08_f680),
    case(0xbefb_90e2, 0xbef1_90c3),
    case(0x3ef0_cf69, 0x3ee8_078e),
    case(0xbf4b_94b7, 0xbf36_caaf),
    case(0x3f64_5e3c, 0x3f47_4329),
    case(0x3f17_3f8d, 0x3f0e_99f6),
    case(0xbf28_b08e, 0xbf1c_be88),
    case(0xbf10_e1fe, 0xbf09_457d),
    case(0xbf45_0551, 0xbf32_23ae),
    case(0xbec5_b0c4, 0xbec0_d09d),
    case(0x3f07_baf2, 0x3f01_75bc),
    case(0x3ff5_0746, 0x3f71_0bc2),
    case(0xbee5_2f87, 0xbedd_9bb8),
    case(0x3f01_837d, 0x3ef8_1e45),
    case(0xbf34_aba9, 0xbf26_0aaf),
    case(0xbf11_626c, 0xbf09_b1d3),
    case(0x3f4d_3cd9, 0x3f37_f2a5),
    case(0x3f91_25cb, 0x3f67_f5fb),
    case(0xbf4c_0e93, 0xbf37_1feb),
    case(0xbeeb_d2b3, 0xbee3_92ac),
    case(0x3f80_08e7, 0x3f57_7443),
    case(0xbea6_c8dc, 0xbea3_d9bc),
    case(0x3f4d_4531, 0x3f37_f872),
    case(0xbf15_e0b0, 0xbf0d_760d),
    case(0xbf7a_822c, 0xbf54_6671),
    case(0x3f84_9203, 0x3f5c_378b),
    case(0x3f4a_6942, 0x3f35_f88b),
    case(0x3f34_d3ac, 0x3f26_2922),
    case(0x3f33_2a89, 0x3f24_e4d3),
    case(0x3f4b_71f0, 0x3f36_b254),
    case(0xbf6d_d621, 0xbf4d_11aa),
    case(0x3efc_6f23, 0x3ef2_54a2),
    case(0x3f32_5656, 0x3f24_4249),
    case(0xbf4b_e887, 0xbf37_0553),
    case(0xbee0_322b, 0xbed9_1988),
    case(0xbf73_ca19, 0xbf50_93a2),
    case(0x3f08_fd53, 0x3f02_8b73),
    case(0xbf4d_7661, 0xbf38_1aa3),
    case(0x3f75_b49a, 0x3f51_ae88),
    case(0x3edf_0b40, 0x3ed8_0e4d),
    case(0xbf78_ec44, 0xbf53_82d0),
    case(0xbed0_4163, 0xbeca_8f6e),
    case(0x3f32_7ad0, 0x3f24_5e42),
    case(0x3ef8_a234, 0x3eee_f9e0),
    case(0x3f66_ed09, 0x3f48_dbb2),
    case(0xbedb_11c5, 0xbed4_7231),
    case(0xbf4d_9768, 0xbf38_3195),
    case(0xbf37_256d, 0xbf27_eb11),
    case(0xbf1e_00a8, 0xbf14_2917),
    case(0x3ef4_e249, 0x3eeb_a74d),
    case(0xbf73_8a1b, 0xbf50_6e81),
    case(0xbf0b_e6e3, 0xbf05_0a9d),
    case(0x3f4f_38c1, 0x3f39_5277),
    case(0x3f32_53a7, 0x3f24_403a),
    case(0x3eef_b796, 0x3ee7_0dfa),
    case(0x3f20_7f4c, 0x3f16_3018),
    case(0x3efc_d8d0, 0x3ef2_b1b4),
    case(0xbf6d_2015, 0xbf4c_a47d),
    case(0xbdc0_fed6, 0xbdc0_b5be),
    case(0x3efb_ff34, 0x3ef1_f202),
    case(0x3f3b_a3d3, 0x3f2b_48bf),
    case(0x3f1d_fcdb, 0x3f14_25fe),
    case(0x4019_40a0, 0x3f2d_f0f0),
    case(0xbf75_3533, 0xbf51_6557),
    case(0xbfea_b28d, 0xbf77_364b),
    case(0xbea7_0efd, 0xbea4_1c2b),
    case(0x3ef8_7c55, 0x3eee_d861),
    case(0xbf6d_9a37, 0xbf4c_edc7),
    case(0xbedd_e6dc, 0xbed7_0515),
    case(0x3f35_cd30, 0x3f26_e6a3),
    case(0xbf07_9c8a, 0xbf01_5b7f),
    case(0xbfa5_8e98, 0xbf76_36ed),
    case(0xbefc_8c81, 0xbef2_6e80),
    case(0x3f32_9dce, 0x3f24_7914),
    case(0xbf0c_21ea, 0xbf05_3d08),
    case(0xbf37_b2ad, 0xbf28_5596),
    case(0x3f4c_eccc, 0x3f37_baf0),
    case(0x3f71_7e88, 0x3f4f_3cd0),
    case(0xbf7c_7dd7, 0xbf55_8033),
    case(0xbef2_f051, 0xbee9_ecc7),
    case(0xbf07_e2a3, 0xbf01_97f8),
    case(0x3f36_31c1, 0x3f27_32d7),
    case(0xbf5e_0b9d, 0xbf43_3b86),
    case(0x3f82_3922, 0x3f59_c94d),
    case(0x3f68_2bfe, 0x3f49_a0d7),
    case(0x3f35_7677, 0x3f26_a4d7),
    case(0xbe75_a363, 0xbe73_4a09),
    case(0xbec8_ad22, 0xbec3_93dd),
    case(0xbf00_0fe2, 0xbef5_9324),
    case(0xbf2d_4fe5, 0xbf20_5f89),
    case(0x3f16_138c, 0x3f0d_a06e),
    case(0xbeff_e68e, 0xbef5_60ef),
    case(0xbebc_7ad9, 0xbeb8_406a),
    case(0x3ef5_017f, 0x3eeb_c302),
    case(0xbf5c_401e, 0xbf42_1113),
    case(0x3f4a_db4c, 0x3f36_48af),
    case(0x3f68_7a9f, 0x3f49_d140),
    case(0x3f68_6cfc, 0x3f49_c8dc),
    case(0x3f0c_094a, 0x3f05_2800),
    case(0x3f60_61bc, 0x3f44_bc53),
    case(0x3efe_173d, 0x3ef3_c9e6),
    case(0x3f2e_b081, 0x3f21_71c8),
    case(0x40cb_de3d, 0x3db3_5db0),
    case(0xbf6e_e5a3, 0xbf4d_b3bd),
    case(0xbf33_52d5, 0xbf25_03a4),
    case(0x3f01_dc8d, 0x3ef8_ba05),
    case(0xbf49_0373, 0xbf34_fc2d),
    case(0xbf46_507c, 0xbf33_10ef),
    case(0xbfd9_2732, 0xbf7d_fad4),
    case(0x3f9e_50ac, 0x3f71_db43),
    case(0xbf4d_f849, 0xbf38_74cf),
    case(0xbf49_29ff, 0xbf35_176e),
    case(0x3f1c_1645, 0x3f12_981f),
    case(0xbf4b_5aca, 0xbf36_a21d),
    case(0x3f11_6125, 0x3f09_b0c0),
    case(0x3f83_1544, 0x3f5a_af73),
    case(0xbf17_a4c7, 0xbf0e_edfc),
    case(0xbf0b_0190, 0xbf04_467b),
    case(0x3f16_125f, 0x3f0d_9f74),
    case(0xbfb0_19b5, 0xbf7b_25ca),
    case(0xbf9a_c1ee, 0xbf6f_6e5e),
    case(0x3f6a_8052, 0x3f4b_0e23),
    case(0x3ef7_2ea9, 0x3eed_b10b),
    case(0xbf7e_f61d, 0xbf56_da88),
    case(0x3f31_1c0d, 0x3f23_50be),
    case(0xbf45_cae1, 0xbf32_b15b),
    case(0x3f32_1019, 0x3f24_0c63),
    case(0xbee1_7f06, 0xbeda_46ce),
    case(0xbfb2_a17a, 0xbf7c_1442),
    case(0xbfc0_3a75, 0xbf7f_63ff),
    case(0xbf35_e4e9, 0xbf26_f89f),
    case(0x3fb5_c886, 0x3f7d_1a13),
    case(0x3ef1_6474, 0x3ee8_8c60),
    case(0xbdd8_eadc, 0xbdd8_8317),
    case(0xbf72_88a3, 0xbf4f_d89b),
    case(0xbf4b_0b3c, 0xbf36_6a54),
    case(0x3f04_c1de, 0x3efd_c5d9),
    case(0x4013_ced0, 0x3f3d_459e),
    case(0xbf34_4cf3, 0xbf25_c28e),
    case(0xbf6b_b651, 0xbf4b_ca56),
    case(0x3ee7_608c, 0x3edf_94f1),
    case(0xbeff_305f, 0xbef4_c0f9),
    case(0xbf45_59fa, 0xbf32_6071),
    case(0xbf7e_c67d, 0xbf56_c09f),
    case(0xbfca_11ae, 0xbf7f_fdf9),
    case(0xbf32_3138, 0xbf24_25cf),
    case(0xbee0_ea64, 0xbed9_c052),
    case(0x3f71_476f, 0x3f4f_1c73),
    case(0xbea3_aad9, 0xbea0_e4eb),
    case(0x3f64_9894, 0x3f47_67c4),
    case(0xbf5d_7054, 0xbf42_d6f0),
    case(0xbf4a_d214, 0xbf36_4236),
    case(0x3f0d_cc5a, 0x3f06_a86f),
    case(0xbee4_16e6, 0xbedc_9e9c),
    case(0x3f6b_397b, 0x3f4b_7eb0),
    case(0x3f04_46a7, 0x3efc_efb4),
    case(0x3fc8_7e0a, 0x3f7f_ff5a),
    case(0x3f64_cfd5, 0x3f47_8a66),
    case(0xbf4e_de55, 0xbf39_140a),
    case(0xbf36_17aa, 0xbf27_1f15),
    case(0xbf17_b391, 0xbf0e_fa41),
    case(0x3ed3_1035, 0x3ecd_22d2),
    case(0xbf48_5de7, 0xbf34_86f3),
    case(0xbf02_5a07, 0xbef9_9541),
    case(0x3f9b_b002, 0x3f70_1544),
    case(0xbf79_edf8, 0xbf54_1392),
    case(0xbb44_9600, 0xbb44_95ed),
    case(0xbf93_475f, 0xbf69_bb5e),
    case(0xbd92_9b7f, 0xbd92_7b73),
    case(0x405b_2257, 0xbe8e_a9f9),
    case(0xbf33_94a1, 0xbf25_35ec),
    case(0x3f5f_5853, 0x3f44_1216),
    case(0x3f46_ec49, 0x3f33_8026),
    case(0x3f50_20f0, 0x3f39_f259),
    case(0xbf6a_7db2, 0xbf4b_0c8a),
    case(0x3f4b_06ed, 0x3f36_674f),
    case(0x3f7e_0d88, 0x3f56_5bba),
    case(0x3f2f_769c, 0x3f22_0b57),
    case(0x3cd8_060b, 0x3cd7_ffa2),
    case(0x3f34_c515, 0x3f26_1e08),
    case(0x3f4e_84b9, 0x3f38_d616),
    case(0xbf17_ac5b, 0xbf0e_f446),
    case(0x3f67_f4e3, 0x3f49_7edd),
];

pub fn run(r: &dyn Routines) -> CheckResult {
    ToleranceChecker::new(MAX_ULP).check(&TABLE, |x| r.sin(f32::from_bits(x)).to_bits())
}

pub fn export() -> FixtureSet {
    let cases = TABLE
        .iter()
        .enumerate()
        .map(|(i, t)| FixtureCase {
            name: format!("sin-{:03}", i + 1),
            function: "sin".to_string(),
            inputs: json!({"x": format_bits(t.input)}),
            expected_output: format_bits(t.expected),
            tolerance_ulp: Some(MAX_ULP),
        })
        .collect();
    FixtureSet::new("math", cases)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::routines::Reference;

    struct Drift(u32);

    impl Routines for Drift {
        fn sin(&self, x: f32) -> f32 {
            let bits = avrlibc_core::math::sin(x).to_bits();
            if bits & 0x7fff_ffff == 0 {
                return f32::from_bits(bits);
            }
            f32::from_bits(bits + self.0)
        }
    }

    #[test]
    fn reference_passes() {
        assert_eq!(run(&Reference).map(|p| p.cases), Ok(500));
    }

    #[test]
    fn drift_within_tolerance_passes() {
        assert!(run(&Drift(2)).is_ok());
    }

    #[test]
    fn drift_beyond_tolerance_fails_at_first_case() {
        let err = run(&Drift(3)).unwrap_err();
        assert_eq!(err.index, 1);
        assert_eq!(err.code, 1);
    }
}
