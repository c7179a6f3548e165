//! One attribute of every supported value type.

use std::str::FromStr;

use bindery_core::{ConfigClass, ConfigType, Declare, Method};
use bindery_testing::{assert_full_mapping, assert_recorded_defaults, record_defaults};
use rstest::rstest;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum MyEnum {
    Foo,
    Bar,
}

impl FromStr for MyEnum {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "FOO" => Ok(Self::Foo),
            "BAR" => Ok(Self::Bar),
            other => Err(format!("unknown variant {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
struct ValueClass(String);

impl FromStr for ValueClass {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_string()))
    }
}

#[derive(Debug, Clone, Default)]
struct Config1 {
    boolean_option: bool,
    boxed_boolean_option: Option<bool>,
    byte_option: i8,
    boxed_byte_option: Option<i8>,
    short_option: i16,
    boxed_short_option: Option<i16>,
    integer_option: i32,
    boxed_integer_option: Option<i32>,
    long_option: i64,
    boxed_long_option: Option<i64>,
    float_option: f32,
    boxed_float_option: Option<f32>,
    double_option: f64,
    boxed_double_option: Option<f64>,
    string_option: Option<String>,
    my_enum_option: Option<MyEnum>,
    value_class_option: Option<ValueClass>,
}

impl ConfigType for Config1 {
    fn describe() -> ConfigClass<Self> {
        ConfigClass::builder("Config1")
            .constructor(Self::default)
            .method(Method::getter("is_boolean_option", |c: &Self| c.boolean_option))
            .method(
                Method::setter("set_boolean_option", |c: &mut Self, v: bool| c.boolean_option = v)
                    .config("booleanOption"),
            )
            .method(Method::getter("get_boxed_boolean_option", |c: &Self| c.boxed_boolean_option))
            .method(
                Method::setter("set_boxed_boolean_option", |c: &mut Self, v: bool| {
                    c.boxed_boolean_option = Some(v);
                })
                .config("boxedBooleanOption"),
            )
            .method(Method::getter("get_byte_option", |c: &Self| c.byte_option))
            .method(
                Method::setter("set_byte_option", |c: &mut Self, v: i8| c.byte_option = v)
                    .config("byteOption"),
            )
            .method(Method::getter("get_boxed_byte_option", |c: &Self| c.boxed_byte_option))
            .method(
                Method::setter("set_boxed_byte_option", |c: &mut Self, v: i8| {
                    c.boxed_byte_option = Some(v);
                })
                .config("boxedByteOption"),
            )
            .method(Method::getter("get_short_option", |c: &Self| c.short_option))
            .method(
                Method::setter("set_short_option", |c: &mut Self, v: i16| c.short_option = v)
                    .config("shortOption"),
            )
            .method(Method::getter("get_boxed_short_option", |c: &Self| c.boxed_short_option))
            .method(
                Method::setter("set_boxed_short_option", |c: &mut Self, v: i16| {
                    c.boxed_short_option = Some(v);
                })
                .config("boxedShortOption"),
            )
            .method(Method::getter("get_integer_option", |c: &Self| c.integer_option))
            .method(
                Method::setter("set_integer_option", |c: &mut Self, v: i32| c.integer_option = v)
                    .config("integerOption"),
            )
            .method(Method::getter("get_boxed_integer_option", |c: &Self| c.boxed_integer_option))
            .method(
                Method::setter("set_boxed_integer_option", |c: &mut Self, v: i32| {
                    c.boxed_integer_option = Some(v);
                })
                .config("boxedIntegerOption"),
            )
            .method(Method::getter("get_long_option", |c: &Self| c.long_option))
            .method(
                Method::setter("set_long_option", |c: &mut Self, v: i64| c.long_option = v)
                    .config("longOption"),
            )
            .method(Method::getter("get_boxed_long_option", |c: &Self| c.boxed_long_option))
            .method(
                Method::setter("set_boxed_long_option", |c: &mut Self, v: i64| {
                    c.boxed_long_option = Some(v);
                })
                .config("boxedLongOption"),
            )
            .method(Method::getter("get_float_option", |c: &Self| c.float_option))
            .method(
                Method::setter("set_float_option", |c: &mut Self, v: f32| c.float_option = v)
                    .config("floatOption"),
            )
            .method(Method::getter("get_boxed_float_option", |c: &Self| c.boxed_float_option))
            .method(
                Method::setter("set_boxed_float_option", |c: &mut Self, v: f32| {
                    c.boxed_float_option = Some(v);
                })
                .config("boxedFloatOption"),
            )
            .method(Method::getter("get_double_option", |c: &Self| c.double_option))
            .method(
                Method::setter("set_double_option", |c: &mut Self, v: f64| c.double_option = v)
                    .config("doubleOption"),
            )
            .method(Method::getter("get_boxed_double_option", |c: &Self| c.boxed_double_option))
            .method(
                Method::setter("set_boxed_double_option", |c: &mut Self, v: f64| {
                    c.boxed_double_option = Some(v);
                })
                .config("boxedDoubleOption"),
            )
            .method(Method::getter("get_string_option", |c: &Self| c.string_option.clone()))
            .method(
                Method::setter("set_string_option", |c: &mut Self, v: String| {
                    c.string_option = Some(v);
                })
                .config("stringOption"),
            )
            .method(Method::getter("get_my_enum_option", |c: &Self| c.my_enum_option))
            .method(
                Method::setter("set_my_enum_option", |c: &mut Self, v: MyEnum| {
                    c.my_enum_option = Some(v);
                })
                .config("myEnumOption"),
            )
            .method(Method::getter("get_value_class_option", |c: &Self| {
                c.value_class_option.clone()
            }))
            .method(
                Method::setter("set_value_class_option", |c: &mut Self, v: ValueClass| {
                    c.value_class_option = Some(v);
                })
                .config("valueClassOption"),
            )
            .build()
    }
}

#[test]
fn recorded_defaults_one_of_everything() {
    let mut recorded = record_defaults::<Config1>().expect("default instance");
    recorded
        .record("set_boolean_option", false, |c, v| c.boolean_option = v)
        .record("set_boxed_boolean_option", None::<bool>, |c, v| c.boxed_boolean_option = v)
        .record("set_boxed_byte_option", None::<i8>, |c, v| c.boxed_byte_option = v)
        .record("set_boxed_double_option", None::<f64>, |c, v| c.boxed_double_option = v)
        .record("set_boxed_float_option", None::<f32>, |c, v| c.boxed_float_option = v)
        .record("set_boxed_integer_option", None::<i32>, |c, v| c.boxed_integer_option = v)
        .record("set_boxed_long_option", None::<i64>, |c, v| c.boxed_long_option = v)
        .record("set_boxed_short_option", None::<i16>, |c, v| c.boxed_short_option = v)
        .record("set_byte_option", 0_i8, |c, v| c.byte_option = v)
        .record("set_double_option", 0.0_f64, |c, v| c.double_option = v)
        .record("set_float_option", 0.0_f32, |c, v| c.float_option = v)
        .record("set_integer_option", 0_i32, |c, v| c.integer_option = v)
        .record("set_long_option", 0_i64, |c, v| c.long_option = v)
        .record("set_my_enum_option", None::<MyEnum>, |c, v| c.my_enum_option = v)
        .record("set_short_option", 0_i16, |c, v| c.short_option = v)
        .record("set_string_option", None::<String>, |c, v| c.string_option = v)
        .record("set_value_class_option", None::<ValueClass>, |c, v| c.value_class_option = v);

    assert_recorded_defaults(&recorded);
}

#[test]
fn full_mapping_one_of_everything() {
    let properties = [
        ("booleanOption", "true"),
        ("boxedBooleanOption", "true"),
        ("byteOption", "1"),
        ("boxedByteOption", "2"),
        ("shortOption", "3"),
        ("boxedShortOption", "4"),
        ("integerOption", "5"),
        ("boxedIntegerOption", "6"),
        ("longOption", "7"),
        ("boxedLongOption", "8"),
        ("floatOption", "1.5"),
        ("boxedFloatOption", "2.5"),
        ("doubleOption", "3.5"),
        ("boxedDoubleOption", "4.5"),
        ("stringOption", "some string"),
        ("myEnumOption", "BAR"),
        ("valueClassOption", "a value"),
    ];
    let expected = Config1 {
        boolean_option: true,
        boxed_boolean_option: Some(true),
        byte_option: 1,
        boxed_byte_option: Some(2),
        short_option: 3,
        boxed_short_option: Some(4),
        integer_option: 5,
        boxed_integer_option: Some(6),
        long_option: 7,
        boxed_long_option: Some(8),
        float_option: 1.5,
        boxed_float_option: Some(2.5),
        double_option: 3.5,
        boxed_double_option: Some(4.5),
        string_option: Some("some string".to_string()),
        my_enum_option: Some(MyEnum::Bar),
        value_class_option: Some(ValueClass("a value".to_string())),
    };

    assert_full_mapping(&properties, &expected);
}

#[rstest]
#[case("byteOption", "128")]
#[case("shortOption", "forty")]
#[case("booleanOption", "yes")]
#[case("myEnumOption", "BAZ")]
fn rejects_values_outside_the_type(#[case] property: &str, #[case] raw: &str) {
    let err = bindery_testing::new_instance::<Config1>(&[(property, raw)]).unwrap_err();
    assert!(err.to_string().contains(property), "{err}");
}
